use crate::assessment::OwnerAssessment;
use core_types::{Band, FactorCategory, Remediation, Severity, ValueSuppressor};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[allow(clippy::too_many_arguments)]
fn suppressor(
    id: &str,
    name: &str,
    category: FactorCategory,
    severity: Severity,
    discount: (Decimal, Decimal),
    evidence: String,
    action: &str,
    months: u32,
) -> ValueSuppressor {
    ValueSuppressor {
        id: id.to_string(),
        name: name.to_string(),
        category,
        severity,
        discount_percent: Band::new(discount.0, discount.1),
        impact_amount: Band::default(),
        remediable: true,
        evidence,
        remediation: Some(Remediation {
            action: action.to_string(),
            time_months: Some(months),
        }),
    }
}

/// Maps an owner assessment to the structural factors a buyer would discount for.
///
/// `concentration` is the top-3 client share from the confirmed financials and
/// takes precedence over the figure given in the assessment. Impact amounts are
/// left at zero; the valuation engine prices them against the enterprise value.
pub fn detect_suppressors(
    assessment: &OwnerAssessment,
    concentration: Option<Decimal>,
) -> Vec<ValueSuppressor> {
    let mut found = Vec::new();

    // Founder dependency
    let knowledge = assessment.knowledge_dependency_pct.unwrap_or_default();
    let brand = assessment.personal_brand_pct.unwrap_or_default();
    let dependency = knowledge.max(brand);
    if dependency > dec!(40) {
        let (severity, discount) = if dependency > dec!(70) {
            (Severity::Critical, (dec!(20), dec!(35)))
        } else if dependency > dec!(50) {
            (Severity::High, (dec!(12), dec!(22)))
        } else {
            (Severity::Medium, (dec!(8), dec!(15)))
        };
        found.push(suppressor(
            "founder_dependency",
            "Founder Dependency",
            FactorCategory::FounderDependency,
            severity,
            discount,
            format!(
                "{knowledge}% of operational knowledge sits with the founder and {brand}% of revenue rests on personal relationships."
            ),
            "Goal Alignment Programme + Succession Planning",
            18,
        ));
    }

    // Customer concentration
    if let Some(top3) = concentration.or(assessment.client_concentration_top3_pct) {
        if top3 > dec!(40) {
            let severity = if top3 > dec!(80) {
                Severity::Critical
            } else if top3 > dec!(60) {
                Severity::High
            } else {
                Severity::Medium
            };
            let low = if top3 > dec!(80) {
                dec!(20)
            } else if top3 > dec!(60) {
                dec!(12)
            } else {
                dec!(6)
            };
            let high = if top3 > dec!(90) {
                dec!(40)
            } else if top3 > dec!(80) {
                dec!(30)
            } else if top3 > dec!(60) {
                dec!(20)
            } else {
                dec!(12)
            };
            let consequence = if top3 > dec!(80) {
                "Losing a single client would be existential."
            } else {
                "A buyer will treat this as high risk."
            };
            found.push(suppressor(
                "customer_concentration",
                "Customer Concentration",
                FactorCategory::Concentration,
                severity,
                (low, high),
                format!("{top3}% of revenue comes from the top 3 clients. {consequence}"),
                "Revenue Diversification Programme",
                24,
            ));
        }
    }

    // Undocumented IP and processes
    let ip_unprotected = assessment.ip_protected == Some(false);
    let undocumented = assessment.undocumented_critical_processes > 2;
    let poorly_documented = assessment
        .documentation_score
        .is_some_and(|score| score < dec!(40));
    if ip_unprotected || undocumented || poorly_documented {
        found.push(suppressor(
            "undocumented_ip",
            "Undocumented IP & Processes",
            FactorCategory::Documentation,
            Severity::High,
            (dec!(5), dec!(15)),
            "Competitive advantages and key processes are not formally documented or protected, so a buyer cannot verify what they are acquiring.".to_string(),
            "Systems Audit + Process Documentation",
            6,
        ));
    }

    // Succession gap
    let no_successor = assessment.has_successor == Some(false);
    let owner_critical = assessment.strategy_fails_without_owner && assessment.sales_fails_without_owner;
    if no_successor || owner_critical {
        found.push(suppressor(
            "succession_gap",
            "No Succession Plan",
            FactorCategory::Succession,
            if no_successor { Severity::Critical } else { Severity::High },
            (dec!(8), dec!(18)),
            "No successor is identified and the business cannot run strategically or commercially without the owner.".to_string(),
            "Exit Readiness Programme",
            24,
        ));
    }

    // Low recurring revenue
    if let Some(recurring) = assessment.recurring_revenue_pct {
        let backlog = assessment.contract_backlog_months.unwrap_or_default();
        if recurring < dec!(30) && backlog < dec!(6) {
            found.push(suppressor(
                "low_recurring",
                "Low Revenue Predictability",
                FactorCategory::RecurringRevenue,
                Severity::Medium,
                (dec!(5), dec!(12)),
                format!("Only {recurring}% recurring revenue with {backlog} months of forward visibility."),
                "Revenue Model Optimisation",
                12,
            ));
        }
    }

    // Declining trajectory
    if let Some(growth) = assessment.revenue_growth_pct {
        if growth < dec!(-10) {
            found.push(suppressor(
                "declining_trajectory",
                "Declining Revenue",
                FactorCategory::Trajectory,
                if growth < dec!(-25) { Severity::Critical } else { Severity::High },
                (dec!(10), dec!(25)),
                format!("Revenue declined {}% year on year.", growth.abs()),
                "Revenue Recovery Programme",
                12,
            ));
        }
    }

    // Team instability
    let turnover = assessment.employee_turnover_pct;
    let high_turnover = turnover.is_some_and(|t| t > dec!(25));
    let low_advocacy = assessment.team_advocacy_pct.is_some_and(|a| a < dec!(40));
    if high_turnover || low_advocacy {
        found.push(suppressor(
            "team_instability",
            "Team Instability",
            FactorCategory::Team,
            if turnover.is_some_and(|t| t > dec!(35)) {
                Severity::High
            } else {
                Severity::Medium
            },
            (dec!(3), dec!(10)),
            "High staff turnover or low team advocacy puts institutional knowledge at risk.".to_string(),
            "Team Engagement Programme",
            12,
        ));
    }

    tracing::debug!(count = found.len(), "Suppressors detected.");
    found
}
