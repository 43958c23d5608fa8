use crate::models::{AppData, TrendPoint, WorkOrderStats, WorkOrderStatus};
use chrono::{Duration, Local, NaiveDate};

const TREND_DAYS: i64 = 30;

pub fn work_order_stats(data: &AppData) -> WorkOrderStats {
    let mut stats = WorkOrderStats {
        total: 0,
        pending: 0,
        in_progress: 0,
        completed: 0,
    };
    for order in data.work_orders.values() {
        stats.total += 1;
        match order.status {
            WorkOrderStatus::Pending => stats.pending += 1,
            WorkOrderStatus::InProgress => stats.in_progress += 1,
            WorkOrderStatus::Completed => stats.completed += 1,
        }
    }
    stats
}

pub fn completion_trend(data: &AppData) -> Vec<TrendPoint> {
    completion_trend_at(Local::now().date_naive(), data)
}

/// Chronological, zero-filled window of the last `TREND_DAYS` days ending
/// today; each point counts work orders completed on that date.
pub fn completion_trend_at(today: NaiveDate, data: &AppData) -> Vec<TrendPoint> {
    let start = today - Duration::days(TREND_DAYS - 1);

    let mut trend = Vec::with_capacity(TREND_DAYS as usize);
    for offset in 0..TREND_DAYS {
        let date = start + Duration::days(offset);
        let count = data
            .work_orders
            .values()
            .filter(|order| {
                order.status == WorkOrderStatus::Completed && order.completed_date == Some(date)
            })
            .count() as u64;
        trend.push(TrendPoint {
            date: date.to_string(),
            count,
        });
    }
    trend
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, WorkOrder};
    use chrono::NaiveDateTime;

    fn order(id: u64, status: WorkOrderStatus, completed: Option<NaiveDate>) -> WorkOrder {
        WorkOrder {
            id,
            maintenance_log_id: 1,
            status,
            assigned_to: "crew".into(),
            scheduled_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            completed_date: completed,
            notes: String::new(),
            priority: Priority::Medium,
            is_critical: false,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn stats_count_each_status() {
        let mut data = AppData::default();
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        data.work_orders.insert(1, order(1, WorkOrderStatus::Pending, None));
        data.work_orders.insert(2, order(2, WorkOrderStatus::Pending, None));
        data.work_orders.insert(3, order(3, WorkOrderStatus::InProgress, None));
        data.work_orders
            .insert(4, order(4, WorkOrderStatus::Completed, Some(today)));

        let stats = work_order_stats(&data);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completed, 1);
    }

    #[test]
    fn trend_is_a_zero_filled_chronological_window() {
        let mut data = AppData::default();
        let today = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let three_days_ago = today - Duration::days(3);
        data.work_orders
            .insert(1, order(1, WorkOrderStatus::Completed, Some(three_days_ago)));
        data.work_orders
            .insert(2, order(2, WorkOrderStatus::Completed, Some(three_days_ago)));
        data.work_orders
            .insert(3, order(3, WorkOrderStatus::Completed, Some(today)));
        // Outside the window.
        data.work_orders.insert(
            4,
            order(
                4,
                WorkOrderStatus::Completed,
                Some(today - Duration::days(40)),
            ),
        );

        let trend = completion_trend_at(today, &data);
        assert_eq!(trend.len(), 30);
        assert!(trend.windows(2).all(|pair| pair[0].date < pair[1].date));
        assert_eq!(trend.last().unwrap().date, today.to_string());
        assert_eq!(trend.last().unwrap().count, 1);
        let hit = trend
            .iter()
            .find(|point| point.date == three_days_ago.to_string())
            .expect("missing day");
        assert_eq!(hit.count, 2);
        assert_eq!(trend.iter().map(|point| point.count).sum::<u64>(), 3);
    }

    #[test]
    fn incomplete_orders_never_reach_the_trend() {
        let mut data = AppData::default();
        let today = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        data.work_orders
            .insert(1, order(1, WorkOrderStatus::InProgress, Some(today)));

        let trend = completion_trend_at(today, &data);
        assert!(trend.iter().all(|point| point.count == 0));
    }
}
