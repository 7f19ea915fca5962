// std
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
// crates
use nomos_da_square::{ExtendedDataSquare, ExtendedHeader, Namespace, Share};
use serde::{Deserialize, Serialize};
// internal
use crate::context::RequestContext;
use crate::error::ShareError;
use crate::namespaced::{GetRangeResult, NamespacedShares};
use crate::Module;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Read,
    Write,
    Admin,
}

impl Permission {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Admin => "admin",
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission each method exposed over RPC requires.
pub const METHOD_PERMISSIONS: [(&str, Permission); 5] = [
    ("share.SharesAvailable", Permission::Read),
    ("share.GetShare", Permission::Read),
    ("share.GetEDS", Permission::Read),
    ("share.GetSharesByNamespace", Permission::Read),
    ("share.GetRange", Permission::Read),
];

/// RPC facing wrapper over a [`Module`], rejecting callers lacking the method's permission.
#[derive(Clone)]
pub struct ShareApi {
    module: Arc<dyn Module>,
    granted: HashSet<Permission>,
}

impl ShareApi {
    pub fn new(module: Arc<dyn Module>, granted: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            module,
            granted: granted.into_iter().collect(),
        }
    }

    fn authorize(&self, required: Permission) -> Result<&dyn Module, ShareError> {
        if self.granted.contains(&required) || self.granted.contains(&Permission::Admin) {
            Ok(self.module.as_ref())
        } else {
            tracing::warn!(%required, "rejected share request");
            Err(ShareError::PermissionDenied(required.as_str()))
        }
    }
}

#[async_trait::async_trait]
impl Module for ShareApi {
    async fn shares_available(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
    ) -> Result<(), ShareError> {
        self.authorize(Permission::Read)?
            .shares_available(ctx, header)
            .await
    }

    async fn get_share(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Share, ShareError> {
        self.authorize(Permission::Read)?
            .get_share(ctx, header, row, col)
            .await
    }

    async fn get_eds(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
    ) -> Result<Arc<ExtendedDataSquare>, ShareError> {
        self.authorize(Permission::Read)?.get_eds(ctx, header).await
    }

    async fn get_shares_by_namespace(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
        namespace: Namespace,
    ) -> Result<NamespacedShares, ShareError> {
        self.authorize(Permission::Read)?
            .get_shares_by_namespace(ctx, header, namespace)
            .await
    }

    async fn get_range(
        &self,
        ctx: &RequestContext,
        height: u64,
        start: usize,
        end: usize,
    ) -> Result<GetRangeResult, ShareError> {
        self.authorize(Permission::Read)?
            .get_range(ctx, height, start, end)
            .await
    }
}
