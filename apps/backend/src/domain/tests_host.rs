use uuid::Uuid;

use crate::domain::host::{HostSeat, SeatTaken};

#[test]
fn unseated_seat_authorizes_nothing() {
    let seat = HostSeat::new();
    assert!(!seat.is_seated());
    assert!(!seat.authorizes(""));
    assert!(!seat.authorizes("host-42"));
}

#[test]
fn claim_seats_the_connection() {
    let mut seat = HostSeat::new();
    let conn = Uuid::new_v4();

    seat.claim(conn, "host-42").unwrap();
    assert_eq!(seat.holder(), Some(conn));
    assert_eq!(seat.topic(), "host-42");
    assert!(seat.authorizes("host-42"));
    assert!(!seat.authorizes("wrong"));
}

#[test]
fn second_connection_cannot_displace_the_holder() {
    let mut seat = HostSeat::new();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    seat.claim(first, "host-1").unwrap();
    let err = seat.claim(second, "host-2").unwrap_err();

    assert_eq!(
        err,
        SeatTaken {
            topic: "host-1".to_string()
        }
    );
    // The original holder and topic are untouched
    assert_eq!(seat.holder(), Some(first));
    assert!(seat.authorizes("host-1"));
}

#[test]
fn holder_may_reclaim_under_a_new_topic() {
    let mut seat = HostSeat::new();
    let conn = Uuid::new_v4();

    seat.claim(conn, "host-1").unwrap();
    seat.claim(conn, "host-2").unwrap();

    assert_eq!(seat.topic(), "host-2");
    assert!(!seat.authorizes("host-1"));
    assert!(seat.authorizes("host-2"));
}

#[test]
fn release_by_non_holder_is_a_noop() {
    let mut seat = HostSeat::new();
    let holder = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    seat.claim(holder, "host-42").unwrap();
    assert!(!seat.release(stranger));
    assert!(seat.authorizes("host-42"));
}

#[test]
fn release_by_holder_clears_the_seat() {
    let mut seat = HostSeat::new();
    let holder = Uuid::new_v4();

    seat.claim(holder, "host-42").unwrap();
    assert!(seat.release(holder));

    assert!(!seat.is_seated());
    assert_eq!(seat.topic(), "");
    assert!(!seat.authorizes("host-42"));
    assert!(!seat.authorizes(""));
}

#[test]
fn seat_can_be_reclaimed_after_release() {
    let mut seat = HostSeat::new();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    seat.claim(first, "host-1").unwrap();
    seat.release(first);
    seat.claim(second, "host-2").unwrap();

    assert_eq!(seat.holder(), Some(second));
    assert!(seat.authorizes("host-2"));
}
