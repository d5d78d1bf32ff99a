//! Rooms (chambres)

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Number of rooms in the hotel catalogue
pub const ROOM_COUNT: i32 = 20;
/// Rooms per floor
pub const ROOMS_PER_FLOOR: i32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Natural key
    pub number: i32,
    pub floor: i32,
    pub bath: bool,
    pub shower: bool,
    pub toilet: bool,
    pub beds: i32,
    /// Internal phone extension
    pub phone_extension: i32,
}

impl Room {
    /// The hotel's room catalogue, seeded into every store.
    pub fn catalogue() -> Vec<Room> {
        (1..=ROOM_COUNT)
            .map(|number| {
                let floor = (number - 1) / ROOMS_PER_FLOOR + 1;
                let beds = if number % ROOMS_PER_FLOOR == 0 {
                    3
                } else if number % 2 == 0 {
                    2
                } else {
                    1
                };
                Room {
                    number,
                    floor,
                    bath: beds > 1,
                    shower: true,
                    toilet: true,
                    beds,
                    phone_extension: floor * 100 + number,
                }
            })
            .collect()
    }
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn exists(&self, number: i32) -> DomainResult<bool>;

    /// All rooms, ordered by number
    async fn list(&self) -> DomainResult<Vec<Room>>;
}
