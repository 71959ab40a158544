use axum::{
    extract::{Path, State},
    Json,
};
use kernel::model::id::HotelId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::hotel::{HotelResponse, HotelWithRoomsResponse},
};

// ホテルの一覧を返す
//
// チケットの存在・ホテルの存在を確認したあとにチケットの支払い状態を
// チェックする。このため、対象チケットを持たないユーザーには
// ホテルが1件も無い場合 402 ではなく 404 を返す。
// この確認順は show_hotel と意図的に異なる（入れ替えないこと）
pub async fn show_hotel_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<HotelResponse>>> {
    let ticket = registry
        .ticket_repository()
        .find_by_user_id(user.id())
        .await?
        .ok_or_else(|| AppError::EntityNotFound("チケットが見つかりませんでした。".into()))?;

    let hotels = registry.hotel_repository().find_all().await?;
    if hotels.is_empty() {
        return Err(AppError::EntityNotFound(
            "ホテルが登録されていません。".into(),
        ));
    }

    if !ticket.grants_hotel_access() {
        return Err(AppError::PaymentRequiredError(
            "宿泊込みのチケットの支払いが完了していません。".into(),
        ));
    }

    Ok(Json(hotels.into_iter().map(HotelResponse::from).collect()))
}

// ホテルを部屋一覧と合わせて返す
//
// こちらは一覧と異なり、チケットの支払い状態をホテルの存在確認より
// 先にチェックする
pub async fn show_hotel(
    user: AuthorizedUser,
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HotelWithRoomsResponse>> {
    let ticket = registry
        .ticket_repository()
        .find_by_user_id(user.id())
        .await?
        .ok_or_else(|| AppError::EntityNotFound("チケットが見つかりませんでした。".into()))?;

    if !ticket.grants_hotel_access() {
        return Err(AppError::PaymentRequiredError(
            "宿泊込みのチケットの支払いが完了していません。".into(),
        ));
    }

    registry
        .hotel_repository()
        .find_with_rooms(hotel_id)
        .await
        .and_then(|hotel| match hotel {
            Some(hotel) => Ok(Json(hotel.into())),
            None => Err(AppError::EntityNotFound(
                "ホテルが見つかりませんでした。".into(),
            )),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{authorized_user, test_registry};

    const ALICE: &str = "11111111-1111-1111-1111-111111111111";
    const DAVE: &str = "44444444-4444-4444-4444-444444444444"; // チケットなし
    const ERIN: &str = "55555555-5555-5555-5555-555555555555"; // 未払い
    const FRANK: &str = "66666666-6666-6666-6666-666666666666"; // リモート
    const GRACE: &str = "77777777-7777-7777-7777-777777777777"; // 宿泊なし
    const PLAZA: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";

    #[sqlx::test(migrations = "../migrations", fixtures("common"))]
    async fn test_show_hotel_list(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let registry = test_registry(pool);

        let res = show_hotel_list(authorized_user(ALICE), State(registry)).await;
        let Ok(Json(hotels)) = res else {
            panic!("hotels should be listed");
        };
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[0].name, "Plaza Hotel");
        assert_eq!(hotels[1].name, "Hilton Hotel");

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("common"))]
    async fn test_show_hotel_list_without_ticket_is_not_found(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let registry = test_registry(pool);

        let res = show_hotel_list(authorized_user(DAVE), State(registry)).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("common"))]
    async fn test_show_hotel_list_with_ineligible_ticket_is_payment_required(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let registry = test_registry(pool);

        // 未払い・リモート・宿泊なしのいずれも、ホテルが存在する場合は 402
        for user_id in [ERIN, FRANK, GRACE] {
            let res = show_hotel_list(authorized_user(user_id), State(registry.clone())).await;
            assert!(matches!(res, Err(AppError::PaymentRequiredError(_))));
        }

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("no_hotels"))]
    async fn test_show_hotel_list_without_hotels_is_not_found(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let registry = test_registry(pool);

        // ホテルが1件も無い場合、支払い状態のチェックより存在確認が先のため、
        // 対象外チケットのユーザーにも 402 ではなく 404 を返す
        let res = show_hotel_list(authorized_user(ERIN), State(registry.clone())).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        let res = show_hotel_list(authorized_user(ALICE), State(registry)).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("common"))]
    async fn test_show_hotel(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let registry = test_registry(pool);

        let res = show_hotel(
            authorized_user(ALICE),
            Path(PLAZA.parse().unwrap()),
            State(registry),
        )
        .await;
        let Ok(Json(hotel)) = res else {
            panic!("hotel should be found");
        };
        assert_eq!(hotel.name, "Plaza Hotel");
        assert_eq!(hotel.rooms.len(), 2);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations", fixtures("common"))]
    async fn test_show_hotel_checks_eligibility_before_existence(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let registry = test_registry(pool);

        // 一覧とは逆順のため、存在しないホテル ID でも対象外チケットなら 402
        let res = show_hotel(
            authorized_user(ERIN),
            Path(HotelId::new()),
            State(registry.clone()),
        )
        .await;
        assert!(matches!(res, Err(AppError::PaymentRequiredError(_))));

        // 条件を満たすチケットであれば存在確認まで進み 404
        let res = show_hotel(authorized_user(ALICE), Path(HotelId::new()), State(registry)).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }
}
