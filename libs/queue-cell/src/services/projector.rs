// libs/queue-cell/src/services/projector.rs
use shared_models::{Appointment, AppointmentStatus};

use crate::models::{QueueSnapshot, QueueStats};

/// Pure projection of a partition's appointments into the serving
/// order. Both the queue view and call-next selection read from here,
/// so they can never disagree on ordering.
pub struct QueueProjector;

impl QueueProjector {
    /// Fixed display order: the called patient first, then waiting
    /// booked patients by token, then skipped patients by token, then
    /// completed ones, then unpaid pendings in booking order.
    pub fn project(appointments: Vec<Appointment>) -> QueueSnapshot {
        let stats = Self::stats(&appointments);

        let mut queue: Vec<Appointment> = Vec::with_capacity(appointments.len());
        for status in [
            AppointmentStatus::Called,
            AppointmentStatus::Booked,
            AppointmentStatus::Skipped,
            AppointmentStatus::Completed,
        ] {
            let mut group: Vec<Appointment> = appointments
                .iter()
                .filter(|a| a.status == status)
                .cloned()
                .collect();
            group.sort_by_key(|a| a.token_number.unwrap_or(i32::MAX));
            queue.extend(group);
        }

        let mut pending: Vec<Appointment> = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        queue.extend(pending);

        QueueSnapshot { queue, stats }
    }

    /// The appointment call-next would serve: lowest-token booked
    /// patient, falling back to the lowest-token skipped one. Skipping
    /// costs a patient their place relative to never-skipped patients
    /// but never drops them.
    pub fn next_eligible(appointments: &[Appointment]) -> Option<&Appointment> {
        Self::lowest_token(appointments, AppointmentStatus::Booked)
            .or_else(|| Self::lowest_token(appointments, AppointmentStatus::Skipped))
    }

    fn lowest_token(
        appointments: &[Appointment],
        status: AppointmentStatus,
    ) -> Option<&Appointment> {
        appointments
            .iter()
            .filter(|a| a.status == status)
            .min_by_key(|a| a.token_number.unwrap_or(i32::MAX))
    }

    fn stats(appointments: &[Appointment]) -> QueueStats {
        let mut stats = QueueStats {
            total: appointments.len() as i32,
            ..QueueStats::default()
        };
        for appointment in appointments {
            match appointment.status {
                AppointmentStatus::Pending => stats.pending += 1,
                AppointmentStatus::Booked => stats.booked += 1,
                AppointmentStatus::Called => stats.called += 1,
                AppointmentStatus::Completed => stats.completed += 1,
                AppointmentStatus::Skipped => stats.skipped += 1,
                AppointmentStatus::Cancelled => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared_models::PaymentStatus;
    use uuid::Uuid;

    fn appointment(status: AppointmentStatus, token: Option<i32>) -> Appointment {
        let mut appt = Appointment::new_pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            None,
        );
        appt.status = status;
        appt.token_number = token;
        if token.is_some() {
            appt.payment_status = PaymentStatus::Paid;
        }
        appt
    }

    #[test]
    fn test_order_called_booked_skipped_completed_pending() {
        let appointments = vec![
            appointment(AppointmentStatus::Pending, None),
            appointment(AppointmentStatus::Completed, Some(1)),
            appointment(AppointmentStatus::Skipped, Some(2)),
            appointment(AppointmentStatus::Booked, Some(4)),
            appointment(AppointmentStatus::Booked, Some(3)),
            appointment(AppointmentStatus::Called, Some(5)),
        ];

        let snapshot = QueueProjector::project(appointments);
        let statuses: Vec<AppointmentStatus> =
            snapshot.queue.iter().map(|a| a.status).collect();
        assert_eq!(
            statuses,
            vec![
                AppointmentStatus::Called,
                AppointmentStatus::Booked,
                AppointmentStatus::Booked,
                AppointmentStatus::Skipped,
                AppointmentStatus::Completed,
                AppointmentStatus::Pending,
            ]
        );
        // Booked patients ascend by token.
        assert_eq!(snapshot.queue[1].token_number, Some(3));
        assert_eq!(snapshot.queue[2].token_number, Some(4));
    }

    #[test]
    fn test_cancelled_left_out_of_queue_but_counted_in_total() {
        let appointments = vec![
            appointment(AppointmentStatus::Booked, Some(1)),
            appointment(AppointmentStatus::Cancelled, Some(2)),
        ];

        let snapshot = QueueProjector::project(appointments);
        assert_eq!(snapshot.queue.len(), 1);
        assert_eq!(snapshot.stats.total, 2);
        assert_eq!(snapshot.stats.booked, 1);
    }

    #[test]
    fn test_next_eligible_prefers_booked_over_lower_skipped_token() {
        let skipped = appointment(AppointmentStatus::Skipped, Some(1));
        let booked = appointment(AppointmentStatus::Booked, Some(2));
        let appointments = vec![skipped, booked.clone()];

        let next = QueueProjector::next_eligible(&appointments).unwrap();
        assert_eq!(next.id, booked.id);
    }

    #[test]
    fn test_next_eligible_falls_back_to_skipped() {
        let skipped = appointment(AppointmentStatus::Skipped, Some(3));
        let completed = appointment(AppointmentStatus::Completed, Some(1));
        let appointments = vec![completed, skipped.clone()];

        let next = QueueProjector::next_eligible(&appointments).unwrap();
        assert_eq!(next.id, skipped.id);
    }

    #[test]
    fn test_next_eligible_empty_queue() {
        let appointments = vec![
            appointment(AppointmentStatus::Completed, Some(1)),
            appointment(AppointmentStatus::Pending, None),
        ];
        assert!(QueueProjector::next_eligible(&appointments).is_none());
    }

    #[test]
    fn test_stats_counts() {
        let appointments = vec![
            appointment(AppointmentStatus::Pending, None),
            appointment(AppointmentStatus::Booked, Some(1)),
            appointment(AppointmentStatus::Booked, Some(2)),
            appointment(AppointmentStatus::Called, Some(3)),
            appointment(AppointmentStatus::Completed, Some(4)),
            appointment(AppointmentStatus::Skipped, Some(5)),
        ];

        let stats = QueueProjector::project(appointments).stats;
        assert_eq!(
            stats,
            QueueStats {
                total: 6,
                pending: 1,
                booked: 2,
                called: 1,
                completed: 1,
                skipped: 1,
            }
        );
    }
}
