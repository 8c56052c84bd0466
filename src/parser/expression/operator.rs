#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
}

impl RelationalOperator {
    pub fn get_binding_power(&self) -> (u8, u8) {
        // 1. Comparison operators
        (9, 10)
    }

    pub fn compare(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Equal => lhs == rhs,
            Self::NotEqual => lhs != rhs,
            Self::LessThan => lhs < rhs,
            Self::LessThanEqual => lhs <= rhs,
            Self::GreaterThan => lhs > rhs,
            Self::GreaterThanEqual => lhs >= rhs,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn get_binding_power(&self) -> (u8, u8) {
        match self {
            // 2. Logical AND operator
            Self::And => (5, 6),
            // 3. Logical OR operator
            Self::Or => (3, 4),
        }
    }

    /// Both operands are always computed by the caller; this only combines them.
    pub fn combine(&self, lhs: bool, rhs: bool) -> bool {
        match self {
            Self::And => lhs && rhs,
            Self::Or => lhs || rhs,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Relational(RelationalOperator),
    Logical(LogicalOperator),
}

impl InfixOperator {
    pub fn get_binding_power(&self) -> (u8, u8) {
        match self {
            Self::Relational(operator) => operator.get_binding_power(),
            Self::Logical(operator) => operator.get_binding_power(),
        }
    }
}
