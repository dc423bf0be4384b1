use crate::assessment::OwnerAssessment;
use core_types::{Band, BaselineMetrics, FactorCategory, Severity, ValueEnhancer};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn enhancer(id: &str, name: &str, category: FactorCategory, evidence: String) -> ValueEnhancer {
    ValueEnhancer {
        id: id.to_string(),
        name: name.to_string(),
        category,
        severity: Severity::Low,
        discount_percent: Band::default(),
        impact_amount: Band::default(),
        remediable: false,
        evidence,
        remediation: None,
    }
}

/// Finds the factors that protect or add to the sale value.
pub fn identify_enhancers(
    baseline: &BaselineMetrics,
    assessment: &OwnerAssessment,
    surplus_cash: Option<Decimal>,
) -> Vec<ValueEnhancer> {
    let mut found = Vec::new();

    if let Some(surplus) = surplus_cash.filter(|s| *s > dec!(500000)) {
        let mut enhancer = enhancer(
            "surplus_cash",
            "Significant Surplus Cash",
            FactorCategory::Cash,
            format!("{} surplus above operating requirements", surplus.round_dp(0)),
        );
        enhancer.impact_amount = Band::new(surplus, surplus);
        found.push(enhancer);
    }

    if baseline.employee_count > 0 && baseline.revenue_per_employee > dec!(350000) {
        found.push(enhancer(
            "high_productivity",
            "High Revenue per Employee",
            FactorCategory::Productivity,
            format!(
                "{} revenue per employee indicates efficient operations",
                baseline.revenue_per_employee.round_dp(0)
            ),
        ));
    }

    if baseline.net_margin > dec!(12) {
        found.push(enhancer(
            "strong_margins",
            "Above-Average Profitability",
            FactorCategory::Profitability,
            format!(
                "{}% net margin demonstrates pricing power",
                baseline.net_margin.round_dp(1)
            ),
        ));
    }

    if let Some(recurring) = assessment.recurring_revenue_pct.filter(|r| *r > dec!(60)) {
        found.push(enhancer(
            "high_recurring",
            "Strong Recurring Revenue",
            FactorCategory::RecurringRevenue,
            format!("{recurring}% recurring revenue provides predictability"),
        ));
    }

    if let Some(advocacy) = assessment.team_advocacy_pct.filter(|a| *a > dec!(80)) {
        found.push(enhancer(
            "team_culture",
            "Strong Team Culture",
            FactorCategory::Team,
            format!("{advocacy}% team advocacy indicates a workforce that will stay through a transition"),
        ));
    }

    if assessment.competitive_moats >= 3 && assessment.ip_protected == Some(true) {
        found.push(enhancer(
            "protected_ip",
            "Protected Competitive Advantages",
            FactorCategory::Documentation,
            format!(
                "{} documented competitive advantages with formal protection",
                assessment.competitive_moats
            ),
        ));
    }

    tracing::debug!(count = found.len(), "Enhancers identified.");
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> BaselineMetrics {
        BaselineMetrics {
            revenue: dec!(8000000),
            gross_margin: dec!(50),
            net_margin: dec!(15),
            ebitda: Some(dec!(1600000)),
            employee_count: 20,
            revenue_per_employee: dec!(400000),
            debtor_days: None,
            creditor_days: None,
            client_concentration: None,
            surplus_cash: None,
            revenue_growth: None,
            period_end: None,
        }
    }

    #[test]
    fn identifies_every_enhancer_above_threshold() {
        let assessment = OwnerAssessment {
            recurring_revenue_pct: Some(dec!(70)),
            team_advocacy_pct: Some(dec!(90)),
            ip_protected: Some(true),
            competitive_moats: 3,
            ..Default::default()
        };
        let found = identify_enhancers(&baseline(), &assessment, Some(dec!(750000)));
        let ids: Vec<&str> = found.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "surplus_cash",
                "high_productivity",
                "strong_margins",
                "high_recurring",
                "team_culture",
                "protected_ip"
            ]
        );
        assert_eq!(found[0].impact_amount.high, dec!(750000));
        assert!(found.iter().all(|e| !e.remediable && e.discount_percent == Band::default()));
    }

    #[test]
    fn unprotected_moats_do_not_count() {
        let assessment = OwnerAssessment {
            competitive_moats: 5,
            ip_protected: Some(false),
            ..Default::default()
        };
        let mut modest = baseline();
        modest.net_margin = dec!(8);
        modest.revenue_per_employee = dec!(150000);
        assert!(identify_enhancers(&modest, &assessment, Some(dec!(100000))).is_empty());
    }
}
