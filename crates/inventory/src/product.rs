use stockroom_core::{DomainError, DomainResult, Timestamp};

/// Ceiling applied when a product is registered without an explicit one.
pub const DEFAULT_MAX_CAPACITY: i64 = 100;

/// Registration input for a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub description: String,
    pub initial_quantity: i64,
    pub max_capacity: i64,
}

impl NewProduct {
    /// Start from a code and a name; quantity 0, ceiling [`DEFAULT_MAX_CAPACITY`].
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: String::new(),
            initial_quantity: 0,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn initial_quantity(mut self, quantity: i64) -> Self {
        self.initial_quantity = quantity;
        self
    }

    pub fn max_capacity(mut self, max_capacity: i64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

/// A stock-keeping record with a bounded quantity.
///
/// `0 <= quantity <= max_capacity` holds for every value of this type; the only
/// way to change the quantity is [`Product::adjust_quantity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    code: String,
    name: String,
    description: String,
    quantity: i64,
    max_capacity: i64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Product {
    pub fn create(new: NewProduct) -> DomainResult<Self> {
        let now = Timestamp::now();
        Self::from_parts(
            new.code,
            new.name,
            new.description,
            new.initial_quantity,
            new.max_capacity,
            now.clone(),
            now,
        )
    }

    /// Rebuild a product from already-persisted values, re-checking invariants.
    pub(crate) fn from_parts(
        code: String,
        name: String,
        description: String,
        quantity: i64,
        max_capacity: i64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> DomainResult<Self> {
        if code.trim().is_empty() {
            return Err(DomainError::validation("product code cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if max_capacity <= 0 {
            return Err(DomainError::validation("maximum stock must be positive"));
        }
        if quantity > max_capacity {
            return Err(DomainError::validation(format!(
                "quantity {quantity} exceeds maximum stock {max_capacity}"
            )));
        }

        Ok(Self {
            code,
            name,
            description,
            quantity,
            max_capacity,
            created_at,
            updated_at,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn max_capacity(&self) -> i64 {
        self.max_capacity
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Share of the ceiling currently in stock, in percent.
    pub fn occupancy_percent(&self) -> f64 {
        self.quantity as f64 / self.max_capacity as f64 * 100.0
    }

    /// Apply a signed change: positive is inbound, negative is outbound.
    ///
    /// On error the product is left exactly as it was.
    pub fn adjust_quantity(&mut self, delta: i64) -> DomainResult<()> {
        let new_quantity = match self.quantity.checked_add(delta) {
            Some(q) => q,
            None if delta < 0 => return Err(self.insufficient(delta)),
            None => return Err(self.over_capacity()),
        };

        if new_quantity < 0 {
            return Err(self.insufficient(delta));
        }
        if new_quantity > self.max_capacity {
            return Err(self.over_capacity());
        }

        self.quantity = new_quantity;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn insufficient(&self, delta: i64) -> DomainError {
        DomainError::InsufficientStock {
            product: self.name.clone(),
            requested: delta.saturating_abs(),
        }
    }

    fn over_capacity(&self) -> DomainError {
        DomainError::CapacityExceeded {
            product: self.name.clone(),
            max_capacity: self.max_capacity,
        }
    }
}
