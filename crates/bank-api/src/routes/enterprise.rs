//! Enterprise feature module: plain CRUD.

use bank_core::Enterprise;

use crate::resource::crud_router;
use crate::routing::{FeatureModule, LoadError};

pub fn module() -> FeatureModule {
    FeatureModule::new(crud_router::<Enterprise>())
}

pub async fn load() -> Result<FeatureModule, LoadError> {
    Ok(module())
}
