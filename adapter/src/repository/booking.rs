use crate::database::{
    model::{
        booking::{BookingRow, RoomCapacityRow},
        ticket::TicketRow,
    },
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CreateBooking, MoveBooking, UpsertBooking},
        Booking,
    },
    id::{BookingId, UserId},
    ticket::Ticket,
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>> {
        // bookings と rooms を INNER JOIN し、部屋の情報も一緒に抽出する
        // 1ユーザー1予約を前提とするため LIMIT 1 で1件のみ返す
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    r.room_id,
                    r.hotel_id,
                    r.room_name,
                    r.capacity,
                    r.created_at,
                    r.updated_at
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.user_id = $1
                LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Booking::from))
    }

    // 予約の作成・部屋の変更操作を行う
    async fn upsert(&self, event: UpsertBooking) -> AppResult<BookingId> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下をこの順で調べる。
        // - 指定の部屋 ID をもつ部屋が存在するか
        // - 存在した場合、その部屋に定員まで空きがあるか
        // - 操作ユーザーのチケットが宿泊予約の条件を満たしているか
        // - 部屋の変更の場合、対象の予約が操作ユーザーのものか
        //
        // いずれかを満たさない場合はその時点でエラーを返して終了する
        {
            //
            // ① 部屋の存在確認
            //
            let room: Option<RoomCapacityRow> = sqlx::query_as(
                r#"
                    SELECT room_id, capacity
                    FROM rooms
                    WHERE room_id = $1
                "#,
            )
            .bind(event.room_id())
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let Some(room) = room else {
                return Err(AppError::EntityNotFound(format!(
                    "部屋（{}）が見つかりませんでした。",
                    event.room_id()
                )));
            };

            //
            // ② 定員の確認
            //
            let occupied: i64 = sqlx::query_scalar(
                r#"
                    SELECT COUNT(*)
                    FROM bookings
                    WHERE room_id = $1
                "#,
            )
            .bind(event.room_id())
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if occupied >= i64::from(room.capacity) {
                return Err(AppError::ForbiddenOperation(format!(
                    "部屋（{}）は満室のため予約できません。",
                    event.room_id()
                )));
            }

            //
            // ③ チケットの確認
            //    支払い済み・現地参加・宿泊込みのチケットのみ予約できる
            //
            let ticket: Option<TicketRow> = sqlx::query_as(
                r#"
                    SELECT
                        t.ticket_id,
                        t.status,
                        tt.ticket_type_id,
                        tt.ticket_type_name,
                        tt.price,
                        tt.is_remote,
                        tt.includes_hotel
                    FROM tickets AS t
                    INNER JOIN enrollments AS e ON t.enrollment_id = e.enrollment_id
                    INNER JOIN ticket_types AS tt ON t.ticket_type_id = tt.ticket_type_id
                    WHERE e.user_id = $1
                "#,
            )
            .bind(event.user_id())
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            // チケットが存在しない場合も許可されていない操作として扱う
            let Some(ticket) = ticket else {
                return Err(AppError::ForbiddenOperation(
                    "宿泊対象のチケットが見つかりませんでした。".into(),
                ));
            };

            let ticket = Ticket::try_from(ticket)?;
            if !ticket.grants_hotel_access() {
                return Err(AppError::ForbiddenOperation(
                    "チケットが宿泊予約の条件を満たしていません。".into(),
                ));
            }
        }

        // チェックを通過したら書き込みを行う
        let booking_id = match event {
            UpsertBooking::Create(event) => self.insert_booking(&mut tx, event).await?,
            UpsertBooking::Move(event) => self.update_booking_room(&mut tx, event).await?,
        };

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking_id)
    }
}

impl BookingRepositoryImpl {
    // upsert メソッドでのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    // 新規予約を追加する
    async fn insert_booking(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event: CreateBooking,
    ) -> AppResult<BookingId> {
        let booking_id = BookingId::new();
        let returned: Option<BookingId> = sqlx::query_scalar(
            r#"
                INSERT INTO bookings (booking_id, user_id, room_id)
                VALUES ($1, $2, $3)
                RETURNING booking_id
            "#,
        )
        .bind(booking_id)
        .bind(event.user_id)
        .bind(event.room_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // RETURNING が ID を返さないのは想定外の状態のため、不正な操作として扱う
        returned.ok_or_else(|| AppError::BadRequest("予約 ID を取得できませんでした。".into()))
    }

    // 既存予約の部屋を変更する
    async fn update_booking_room(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event: MoveBooking,
    ) -> AppResult<BookingId> {
        //
        // ④ 対象の予約が存在し、操作ユーザーのものであるかの確認
        //
        let owned: Option<BookingId> = sqlx::query_scalar(
            r#"
                SELECT booking_id
                FROM bookings
                WHERE booking_id = $1 AND user_id = $2
            "#,
        )
        .bind(event.booking_id)
        .bind(event.user_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if owned.is_none() {
            return Err(AppError::ForbiddenOperation(format!(
                "予約（{}）は操作できません。",
                event.booking_id
            )));
        }

        let returned: Option<BookingId> = sqlx::query_scalar(
            r#"
                UPDATE bookings
                SET room_id = $1
                WHERE booking_id = $2
                RETURNING booking_id
            "#,
        )
        .bind(event.room_id)
        .bind(event.booking_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        returned.ok_or_else(|| AppError::BadRequest("予約 ID を取得できませんでした。".into()))
    }
}
