use chrono::NaiveDate;

/// Boundary-inclusive interval intersection between two date ranges.
/// Ranges that share exactly one endpoint conflict: a return on day X
/// blocks a checkout on day X.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Whether a car with `quantity` free units can take one more booking when
/// `overlapping` existing bookings already claim units for the same period.
pub fn has_free_unit(quantity: i32, overlapping: u64) -> bool {
    quantity > 0 && overlapping < quantity as u64
}

/// A car cannot be deleted while any booking references it, regardless of
/// the booking dates.
pub fn deletion_blocked(dependent_bookings: u64) -> bool {
    dependent_bookings > 0
}

/// Quantity after an accepted booking claims one unit.
pub fn consume_unit(quantity: i32) -> i32 {
    quantity - 1
}

/// Quantity after a cancellation hands one unit back. Only called for a
/// cancellation whose delete actually removed a booking row.
pub fn restore_unit(quantity: i32) -> i32 {
    quantity + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        assert!(!ranges_overlap(
            d("2024-01-01"),
            d("2024-01-10"),
            d("2024-01-11"),
            d("2024-01-20"),
        ));
        assert!(!ranges_overlap(
            d("2024-01-11"),
            d("2024-01-20"),
            d("2024-01-01"),
            d("2024-01-10"),
        ));
    }

    #[test]
    fn test_shared_boundary_counts_as_overlap() {
        // Return on the 10th, new checkout on the 10th: conflict.
        assert!(ranges_overlap(
            d("2024-01-01"),
            d("2024-01-10"),
            d("2024-01-10"),
            d("2024-01-15"),
        ));
        assert!(ranges_overlap(
            d("2024-01-10"),
            d("2024-01-15"),
            d("2024-01-01"),
            d("2024-01-10"),
        ));
    }

    #[test]
    fn test_containment_overlaps() {
        // Existing booking entirely inside the new range, and vice versa.
        assert!(ranges_overlap(
            d("2024-01-05"),
            d("2024-01-07"),
            d("2024-01-01"),
            d("2024-01-31"),
        ));
        assert!(ranges_overlap(
            d("2024-01-01"),
            d("2024-01-31"),
            d("2024-01-05"),
            d("2024-01-07"),
        ));
    }

    #[test]
    fn test_no_free_unit_at_zero_quantity() {
        assert!(!has_free_unit(0, 0));
        assert!(!has_free_unit(-1, 0));
    }

    #[test]
    fn test_free_unit_threshold() {
        // quantity 1: one overlapping booking exhausts the pool.
        assert!(has_free_unit(1, 0));
        assert!(!has_free_unit(1, 1));
        // quantity 3: third overlap is the last accepted.
        assert!(has_free_unit(3, 2));
        assert!(!has_free_unit(3, 3));
        assert!(!has_free_unit(3, 4));
    }

    #[test]
    fn test_deletion_blocked_by_any_booking() {
        assert!(!deletion_blocked(0));
        assert!(deletion_blocked(1));
        assert!(deletion_blocked(12));
    }

    #[test]
    fn test_accept_then_cancel_round_trips_quantity() {
        // Acceptance moves quantity by exactly -1, cancellation by exactly +1.
        let quantity = 5;
        let after_accept = consume_unit(quantity);
        assert_eq!(after_accept, 4);
        assert_eq!(restore_unit(after_accept), quantity);
    }

    #[test]
    fn test_racing_cancels_restore_single_unit() {
        // Two cancellations race for the same booking; only the one whose
        // delete removed the row restores a unit, so the car gains exactly
        // one unit back.
        let mut quantity = 4;
        let rows_affected_per_txn = [1u64, 0u64];
        for rows_affected in rows_affected_per_txn {
            if rows_affected > 0 {
                quantity = restore_unit(quantity);
            }
        }
        assert_eq!(quantity, 5);
    }
}
