use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use super::models::{Role, User, UserChanges};

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text", unique)]
    pub email: String,
    pub role: Role,
    pub registration_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            registration_date: model.registration_date,
        }
    }
}

impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        ActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            role: Set(user.role),
            registration_date: Set(user.registration_date),
        }
    }
}

// Only populated fields are written; the id is never part of an update.
impl From<UserChanges> for ActiveModel {
    fn from(changes: UserChanges) -> Self {
        ActiveModel {
            id: NotSet,
            name: changes.name.map_or(NotSet, Set),
            email: changes.email.map_or(NotSet, Set),
            role: changes.role.map_or(NotSet, Set),
            registration_date: NotSet,
        }
    }
}
