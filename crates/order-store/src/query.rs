use thiserror::Error;

use crate::OrderStatus;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Largest page size a caller may request; larger requests are clamped.
pub const MAX_PAGE_SIZE: u64 = 2000;

/// Zero-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// Creates a page request, normalizing out-of-range values.
    ///
    /// Negative page numbers become 0, sizes below 1 fall back to
    /// [`DEFAULT_PAGE_SIZE`] and sizes above [`MAX_PAGE_SIZE`] are clamped.
    pub fn new(page: i64, size: i64) -> Self {
        let page = u64::try_from(page).unwrap_or(0);
        let size = match u64::try_from(size) {
            Ok(0) | Err(_) => DEFAULT_PAGE_SIZE,
            Ok(size) => size.min(MAX_PAGE_SIZE),
        };
        Self { page, size }
    }

    /// Returns the zero-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Sortable order properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Status,
    TotalAmount,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Returns the property name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Status => "status",
            SortField::TotalAmount => "totalAmount",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }

    /// Returns the column name.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Status => "status",
            SortField::TotalAmount => "total_amount",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort specification. `id ASC` is always applied after it as a tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Returned when a sort expression names an unknown property or direction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort expression: {0}")]
pub struct InvalidSort(pub String);

impl Sort {
    /// Creates a sort on the given field.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parses `property[,asc|desc]`, e.g. `id,asc` or `createdAt`.
    ///
    /// Direction matching is case-insensitive; property names are exact.
    pub fn parse(expr: &str) -> Result<Self, InvalidSort> {
        let invalid = || InvalidSort(expr.to_string());
        let mut parts = expr.split(',').map(str::trim);

        let property = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let field = [
            SortField::Id,
            SortField::Status,
            SortField::TotalAmount,
            SortField::CreatedAt,
            SortField::UpdatedAt,
        ]
        .into_iter()
        .find(|f| f.as_str() == property)
        .ok_or_else(invalid)?;

        let direction = match parts.next() {
            None => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(_) => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { field, direction })
    }

    /// Renders the `ORDER BY` clause body, including the `id` tie-break.
    pub fn order_by_sql(&self) -> String {
        match self.field {
            SortField::Id => format!("id {}", self.direction.as_sql()),
            field => format!("{} {}, id ASC", field.column(), self.direction.as_sql()),
        }
    }
}

/// Filtered, sorted and paginated scan over orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderQuery {
    /// Only return orders in this status.
    pub status: Option<OrderStatus>,

    pub page: PageRequest,

    pub sort: Sort,
}

impl OrderQuery {
    /// Creates a query for the first default-sized page of all orders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the page.
    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Sets the sort.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size)
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        self.number + 1 >= self.total_pages()
    }

    /// Maps the content, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
