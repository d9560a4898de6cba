use crate::{
    db::DbPool,
    entities::attendance::{self, Entity as Attendance},
    errors::ServiceError,
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Narrow interface onto the attendance subsystem. The ledger only asks
/// "is this rep checked in today" and records the cash handover amount on
/// the day's entry; everything else about attendance lives elsewhere.
#[derive(Clone)]
pub struct AttendanceService {
    db_pool: Arc<DbPool>,
}

/// [start, end) of the business day containing `at`, in UTC.
pub fn day_bounds(at: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = at
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();
    (start, start + Duration::days(1))
}

impl AttendanceService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Whether the rep has punched in today for the given town.
    #[instrument(skip(self))]
    pub async fn checked_in_today(
        &self,
        user_id: Uuid,
        town_id: Uuid,
    ) -> Result<bool, ServiceError> {
        let db = &*self.db_pool;
        let (start, end) = day_bounds(Utc::now());

        let count = Attendance::find()
            .filter(attendance::Column::UserId.eq(user_id))
            .filter(attendance::Column::TownId.eq(town_id))
            .filter(attendance::Column::PunchInAt.gte(start))
            .filter(attendance::Column::PunchInAt.lt(end))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Records the handed-over cash amount on today's attendance entry,
    /// inside the caller's transaction so a failed settlement never leaves
    /// a stray handover behind. Fails if the day's entry is missing.
    pub async fn record_handover(
        &self,
        txn: &DatabaseTransaction,
        user_id: Uuid,
        town_id: Uuid,
        amount: Decimal,
    ) -> Result<(), ServiceError> {
        let (start, end) = day_bounds(Utc::now());

        let result = Attendance::update_many()
            .col_expr(attendance::Column::HandOverAmount, Expr::value(amount))
            .filter(attendance::Column::UserId.eq(user_id))
            .filter(attendance::Column::TownId.eq(town_id))
            .filter(attendance::Column::PunchInAt.gte(start))
            .filter(attendance::Column::PunchInAt.lt(end))
            .exec(txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::PreconditionFailed(
                "attendance not submitted for today".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_bounds_cover_exactly_one_day() {
        let at = Utc.with_ymd_and_hms(2025, 11, 3, 14, 25, 9).unwrap();
        let (start, end) = day_bounds(at);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 11, 4, 0, 0, 0).unwrap());
        assert!(start <= at && at < end);
    }
}
