//! Recommendation buckets and the next-steps plan

use siteaudit_core::{AnalysisRecord, Recommendation};

use crate::report::{ActionItem, Goal, NextSteps, OngoingActivity, RecommendationGroups};
use crate::tables::{
    GOAL_CONVERSION_TRACKING, GOAL_DASHBOARD, GOAL_PRIVACY, GOAL_VALIDATION, INSTALL_GTM,
    ONGOING_OPTIMIZATION, SETUP_GA4,
};

/// Exact, case-sensitive bucketing. Anything other than `High`, `Medium`
/// or `Low` is dropped.
pub fn recommendation_groups(record: &AnalysisRecord) -> RecommendationGroups {
    let bucket = |priority: &str| -> Vec<Recommendation> {
        record
            .recommendations
            .iter()
            .filter(|r| r.priority == priority)
            .cloned()
            .collect()
    };

    RecommendationGroups {
        high_priority: bucket("High"),
        medium_priority: bucket("Medium"),
        low_priority: bucket("Low"),
    }
}

pub fn next_steps(record: &AnalysisRecord) -> NextSteps {
    let analytics = &record.analytics_detection;

    let mut immediate_actions = Vec::new();
    if !analytics.has_gtm {
        immediate_actions.push(action(INSTALL_GTM));
    }
    if !analytics.has_ga4 {
        immediate_actions.push(action(SETUP_GA4));
    }

    let mut week_1_goals = Vec::new();
    if record.conversion_opportunities.total() > 0 {
        week_1_goals.push(goal(GOAL_CONVERSION_TRACKING));
    }
    week_1_goals.push(goal(GOAL_VALIDATION));

    let mut month_1_goals = vec![goal(GOAL_DASHBOARD)];
    if !analytics.has_consent_management {
        month_1_goals.push(goal(GOAL_PRIVACY));
    }

    NextSteps {
        immediate_actions,
        week_1_goals,
        month_1_goals,
        ongoing_optimization: ONGOING_OPTIMIZATION
            .iter()
            .map(|(activity, frequency)| OngoingActivity {
                activity: activity.to_string(),
                frequency: frequency.to_string(),
            })
            .collect(),
    }
}

fn action((action, priority, effort): (&str, &str, &str)) -> ActionItem {
    ActionItem {
        action: action.to_string(),
        priority: priority.to_string(),
        estimated_effort: effort.to_string(),
    }
}

fn goal((goal, deliverable): (&str, &str)) -> Goal {
    Goal {
        goal: goal.to_string(),
        deliverable: deliverable.to_string(),
    }
}
