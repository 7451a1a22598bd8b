//! Agency feature module: plain CRUD.

use bank_core::Agency;

use crate::resource::crud_router;
use crate::routing::{FeatureModule, LoadError};

pub fn module() -> FeatureModule {
    FeatureModule::new(crud_router::<Agency>())
}

/// Deferred loader registered in the route table.
pub async fn load() -> Result<FeatureModule, LoadError> {
    Ok(module())
}
