//! Room catalogue handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::AppServices;
use crate::domain::Room;
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDto {
    pub number: i32,
    pub floor: i32,
    pub bath: bool,
    pub shower: bool,
    pub toilet: bool,
    pub beds: i32,
    pub phone_extension: i32,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            number: r.number,
            floor: r.floor,
            bath: r.bath,
            shower: r.shower,
            toilet: r.toilet,
            beds: r.beds,
            phone_extension: r.phone_extension,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    responses((status = 200, description = "Room catalogue", body = ApiResponse<Vec<RoomDto>>))
)]
pub async fn list_rooms(
    State(services): State<AppServices>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError<Vec<RoomDto>>> {
    let rooms = services.rooms().await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(rooms.into_iter().map(RoomDto::from).collect())))
}
