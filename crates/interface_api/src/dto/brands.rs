//! Brand DTOs

use serde::{Deserialize, Serialize};

use core_kernel::BrandId;
use domain_claims::BrandNotice;

#[derive(Debug, Default, Deserialize)]
pub struct BrandsQueryParams {
    pub lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BrandResponse {
    pub id: BrandId,
    pub name: String,
    pub notification: String,
}

impl From<BrandNotice> for BrandResponse {
    fn from(notice: BrandNotice) -> Self {
        Self {
            id: notice.id,
            name: notice.name,
            notification: notice.notification,
        }
    }
}
