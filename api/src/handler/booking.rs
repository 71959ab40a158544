use axum::{
    extract::{Path, State},
    Json,
};
use garde::Validate;
use kernel::model::{
    booking::event::{CreateBooking, MoveBooking, UpsertBooking},
    id::BookingId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::booking::{BookingIdResponse, BookingResponse, CreateBookingRequest},
};

// 操作ユーザー自身の予約を部屋の情報と合わせて返す
pub async fn show_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_repository()
        .find_by_user_id(user.id())
        .await
        .and_then(|booking| match booking {
            Some(booking) => Ok(Json(booking.into())),
            None => Err(AppError::EntityNotFound(
                "予約が見つかりませんでした。".into(),
            )),
        })
}

pub async fn register_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<Json<BookingIdResponse>> {
    req.validate(&())?;

    let event = UpsertBooking::Create(CreateBooking::new(user.id(), req.room_id));
    registry
        .booking_repository()
        .upsert(event)
        .await
        .map(BookingIdResponse::from)
        .map(Json)
}

pub async fn move_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<Json<BookingIdResponse>> {
    req.validate(&())?;

    let event = UpsertBooking::Move(MoveBooking::new(booking_id, user.id(), req.room_id));
    registry
        .booking_repository()
        .upsert(event)
        .await
        .map(BookingIdResponse::from)
        .map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{authorized_user, test_registry};

    const ALICE: &str = "11111111-1111-1111-1111-111111111111";
    const ROOM_102: &str = "a1a1a1a1-a1a1-a1a1-a1a1-a1a1a1a1a1a1";
    const ROOM_303: &str = "b2b2b2b2-b2b2-b2b2-b2b2-b2b2b2b2b2b2";

    #[sqlx::test(migrations = "../migrations", fixtures("common"))]
    async fn test_show_booking_without_booking_is_not_found(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let registry = test_registry(pool);

        let res = show_booking(authorized_user(ALICE), State(registry)).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("common"))]
    async fn test_register_then_show_and_move_booking(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let registry = test_registry(pool);

        let req = CreateBookingRequest {
            room_id: ROOM_102.parse().unwrap(),
        };
        let res = register_booking(authorized_user(ALICE), State(registry.clone()), Json(req))
            .await;
        let Ok(Json(created)) = res else {
            panic!("booking should be created");
        };

        let res = show_booking(authorized_user(ALICE), State(registry.clone())).await;
        let Ok(Json(booking)) = res else {
            panic!("booking should be found");
        };
        assert_eq!(booking.id, created.booking_id);
        assert_eq!(booking.room.name, "102");

        // 部屋の変更後も予約 ID は変わらない
        let req = CreateBookingRequest {
            room_id: ROOM_303.parse().unwrap(),
        };
        let res = move_booking(
            authorized_user(ALICE),
            Path(created.booking_id),
            State(registry.clone()),
            Json(req),
        )
        .await;
        let Ok(Json(moved)) = res else {
            panic!("booking should be moved");
        };
        assert_eq!(moved.booking_id, created.booking_id);

        let res = show_booking(authorized_user(ALICE), State(registry)).await;
        let Ok(Json(booking)) = res else {
            panic!("booking should be found");
        };
        assert_eq!(booking.room.name, "303");

        Ok(())
    }
}
