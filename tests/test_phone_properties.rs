//! Property tests for the phone number rules.

use phonebook_mcp_server::domain::{check_phone_number, is_valid_phone_number, PhoneRejection};
use proptest::prelude::*;

/// `<2-3 ASCII digits>-<5+ ASCII digits>`, written without the regex.
fn has_phone_shape(candidate: &str) -> bool {
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let mut parts = candidate.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(area), Some(subscriber), None) => {
            (2..=3).contains(&area.len())
                && all_digits(area)
                && subscriber.len() >= 5
                && all_digits(subscriber)
        }
        _ => false,
    }
}

/// Repeat `block` to `total` digits and put the dash after `area_len`.
fn tiled_number(block: &str, area_len: usize, total: usize) -> String {
    let digits: String = block.chars().cycle().take(total).collect();
    format!("{}-{}", &digits[..area_len], &digits[area_len..])
}

fn near_miss_candidates() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[0-9-]{0,14}",
        "[0-9]{1,4}-{1,2}[0-9]{3,8}",
        "[ +(]?[0-9]{2,3}-[0-9]{5,8}[ x\n]?",
    ]
}

proptest! {
    #[test]
    fn anything_without_the_shape_is_rejected(candidate in near_miss_candidates()) {
        if !has_phone_shape(&candidate) {
            prop_assert!(!is_valid_phone_number(&candidate), "accepted {:?}", candidate);
            prop_assert_eq!(check_phone_number(&candidate), Err(PhoneRejection::Shape));
        }
    }

    #[test]
    fn four_digit_blocks_are_accepted(
        block in "[0-9]{4}",
        area_len in 2usize..=3,
        subscriber_len in 5usize..=15,
    ) {
        let b = block.as_bytes();
        // abab collapses to a 2-digit block (and aaaa to one digit)
        prop_assume!(!(b[0] == b[2] && b[1] == b[3]));

        let number = tiled_number(&block, area_len, area_len + subscriber_len);
        prop_assert!(is_valid_phone_number(&number), "rejected {}", number);
    }

    #[test]
    fn short_blocks_are_rejected(
        block in "[0-9]{2,3}",
        area_len in 2usize..=3,
        subscriber_len in 5usize..=15,
    ) {
        let number = tiled_number(&block, area_len, area_len + subscriber_len);
        prop_assert!(!is_valid_phone_number(&number), "accepted {}", number);
        prop_assert_ne!(check_phone_number(&number), Err(PhoneRejection::Shape));
    }
}
