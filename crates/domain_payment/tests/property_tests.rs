//! Property tests for the engine's cross-field invariants

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_payment::{
    PaymentError, PaymentMethod, PaymentRegisterPatch, PaymentStatus,
};
use test_utils::{PaymentTestContext, RegisterBuilder};

fn status_token() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("PAID"),
        Just("HEALTH INSURANCE"),
        Just("BONUS"),
        Just("paid"),
        Just("health insurance"),
        Just("bonus"),
    ]
}

fn method_token() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("CASH"),
        Just("CREDIT CARD"),
        Just("DEBIT CARD"),
        Just("ONLINE PAYMENT"),
        Just("TRANSFER"),
        Just("BONUS"),
        Just("HEALTH INSURANCE"),
    ]
}

/// A matched pair couples iff neither side forces the other, or both force
/// each other consistently.
fn pair_is_coupled(status: PaymentStatus, method: PaymentMethod) -> bool {
    let status_ok = match status.required_method() {
        Some(required) => method == required,
        None => method.required_status().is_none(),
    };
    status_ok
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// An update carrying both status and method succeeds iff the pair
    /// satisfies the coupling invariant.
    #[test]
    fn coupling_accepts_exactly_matched_pairs(status in status_token(), method in method_token()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let ctx = PaymentTestContext::new();
            let (turn, doctor) = ctx.seed_completed_turn();
            ctx.seed_register(RegisterBuilder::for_turn(turn.id).build());

            let parsed_status = PaymentStatus::parse(status).unwrap();
            let parsed_method = PaymentMethod::parse(method).unwrap();

            let patch = PaymentRegisterPatch {
                status: Some(status.to_string()),
                method: Some(method.to_string()),
                payment_amount: Some(dec!(100)),
                copayment_amount: if parsed_status == PaymentStatus::HealthInsurance {
                    Some(dec!(10))
                } else {
                    None
                },
                paid_at: None,
            };

            let result = ctx.service.update(turn.id, &patch, &doctor).await;

            if pair_is_coupled(parsed_status, parsed_method) {
                let view = result.expect("coupled pair should be accepted");
                prop_assert_eq!(view.status, parsed_status);
                prop_assert_eq!(view.method, Some(parsed_method));
            } else {
                prop_assert!(matches!(result, Err(PaymentError::Validation(_))));
            }
            Ok(())
        })?;
    }

    /// An insurance update with amount A and copayment C is accepted iff
    /// 0 <= C <= A (and both are under the ceiling).
    #[test]
    fn copayment_accepted_iff_within_amount(amount in 1i64..1_000_000, copayment in 0i64..2_000_000) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let ctx = PaymentTestContext::new();
            let (turn, doctor) = ctx.seed_completed_turn();
            ctx.seed_register(RegisterBuilder::for_turn(turn.id).build());

            let patch = PaymentRegisterPatch {
                status: Some("HEALTH INSURANCE".to_string()),
                payment_amount: Some(Decimal::from(amount)),
                copayment_amount: Some(Decimal::from(copayment)),
                ..Default::default()
            };

            let result = ctx.service.update(turn.id, &patch, &doctor).await;

            if copayment <= amount {
                let view = result.expect("copayment within the amount should be accepted");
                prop_assert_eq!(view.copayment_amount, Some(Decimal::from(copayment)));
            } else {
                prop_assert!(matches!(result, Err(PaymentError::Validation(_))));
            }
            Ok(())
        })?;
    }

    /// Amounts at or above the ceiling are always rejected.
    #[test]
    fn ceiling_always_rejects(amount in 10_000_000i64..100_000_000) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let ctx = PaymentTestContext::new();
            let (turn, doctor) = ctx.seed_completed_turn();
            ctx.seed_register(RegisterBuilder::for_turn(turn.id).build());

            let patch = PaymentRegisterPatch {
                status: Some("PAID".to_string()),
                payment_amount: Some(Decimal::from(amount)),
                ..Default::default()
            };

            let result = ctx.service.update(turn.id, &patch, &doctor).await;
            prop_assert!(matches!(result, Err(PaymentError::Validation(_))));
            Ok(())
        })?;
    }
}
