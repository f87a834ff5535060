use diesel::prelude::*;

use chatvault_core::errors::Error;
use chatvault_core::streams::Stream;

use crate::utils::from_millis;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::streams)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StreamDB {
    pub id: String,
    pub chat_id: String,
    pub created_at: i64,
}

impl TryFrom<StreamDB> for Stream {
    type Error = Error;

    fn try_from(db: StreamDB) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: from_millis(db.created_at)?,
            id: db.id,
            chat_id: db.chat_id,
        })
    }
}
