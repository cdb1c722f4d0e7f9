//! Shared API types used by the HTTP service and its tests

pub mod types;

pub use types::{
    BoundingBox, Detection, HealthResponse, OcrFields, OrderItemRequest, OrderRequest,
    OrderResponse, PredictRequest, PredictResponse, ProductMatch, ProductSearchResponse,
    ProductVariant,
};
