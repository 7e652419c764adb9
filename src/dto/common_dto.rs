//! DTOs compartidos entre endpoints
//!
//! Parámetros de paginación validados y el bloque `pagination` que
//! acompaña a todos los listados.

use serde::{Deserialize, Serialize};

use crate::utils::errors::{validation_error, AppError};

/// Límite máximo de página para los listados
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Página por defecto
pub const DEFAULT_PAGE: i64 = 1;

/// Tamaño de página por defecto
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Parámetros de paginación ya validados (1-indexed)
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    /// Validar page/limit: ambos positivos, limit dentro del tope
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, AppError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

        if page < 1 {
            return Err(validation_error("page", "page must be a positive integer"));
        }
        if limit < 1 {
            return Err(validation_error("limit", "limit must be a positive integer"));
        }
        if limit > MAX_PAGE_LIMIT {
            return Err(validation_error("limit", "limit must be between 1 and 100"));
        }

        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Bloque de paginación de las respuestas de listado
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl PaginationMeta {
    /// pages = ceil(total / limit)
    pub fn new(params: PageParams, total: i64) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            total,
            pages: (total + params.limit - 1) / params.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        let params = PageParams::new(None, None).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_params_rejects_non_positive() {
        assert!(PageParams::new(Some(0), None).is_err());
        assert!(PageParams::new(None, Some(0)).is_err());
        assert!(PageParams::new(Some(-3), Some(10)).is_err());
    }

    #[test]
    fn test_page_params_rejects_limit_over_cap() {
        assert!(PageParams::new(None, Some(101)).is_err());
        assert!(PageParams::new(None, Some(100)).is_ok());
    }

    #[test]
    fn test_pagination_meta_page_count() {
        let params = PageParams::new(Some(1), Some(20)).unwrap();
        assert_eq!(PaginationMeta::new(params, 0).pages, 0);
        assert_eq!(PaginationMeta::new(params, 1).pages, 1);
        assert_eq!(PaginationMeta::new(params, 20).pages, 1);
        assert_eq!(PaginationMeta::new(params, 21).pages, 2);
        assert_eq!(PaginationMeta::new(params, 41).pages, 3);
    }

    #[test]
    fn test_offset_is_one_indexed() {
        let params = PageParams::new(Some(3), Some(25)).unwrap();
        assert_eq!(params.offset(), 50);
    }
}
