use serde::Serialize;

/// A purchasable credit top-up plan. The catalog is fixed; users pay the
/// listed price out of band and submit the transaction id for review.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TopUpPlan {
    pub credits: i64,
    pub price: i64,
    pub popular: bool,
}

pub const TOP_UP_PLANS: [TopUpPlan; 3] = [
    TopUpPlan {
        credits: 40,
        price: 299,
        popular: false,
    },
    TopUpPlan {
        credits: 90,
        price: 599,
        popular: true,
    },
    TopUpPlan {
        credits: 150,
        price: 899,
        popular: false,
    },
];

impl TopUpPlan {
    pub fn label(&self) -> String {
        format!("{} Credits", self.credits)
    }
}

pub fn find_plan_by_credits(credits: i64) -> Option<TopUpPlan> {
    TOP_UP_PLANS.iter().copied().find(|p| p.credits == credits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_each_catalog_plan() {
        for plan in TOP_UP_PLANS {
            assert_eq!(find_plan_by_credits(plan.credits), Some(plan));
        }
    }

    #[test]
    fn unknown_credit_amount_has_no_plan() {
        assert_eq!(find_plan_by_credits(41), None);
    }

    #[test]
    fn plan_label_matches_storefront_format() {
        assert_eq!(TOP_UP_PLANS[0].label(), "40 Credits");
    }
}
