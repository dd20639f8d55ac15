//! Values bound to generated statements.

use rust_decimal::Decimal;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A parameter value for a PostgreSQL statement. Each variant reports its own wire type.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Int(i32),
    Decimal(Decimal),
    /// `None` binds SQL NULL typed as text.
    Text(Option<String>),
}

impl BindValue {
    pub fn text(s: impl Into<String>) -> Self {
        BindValue::Text(Some(s.into()))
    }

    pub const NULL: BindValue = BindValue::Text(None);
}

impl<'q> Encode<'q, Postgres> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            BindValue::Int(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            BindValue::Decimal(n) => <Decimal as Encode<Postgres>>::encode_by_ref(n, buf)?,
            BindValue::Text(Some(s)) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)?
            }
            BindValue::Text(None) => IsNull::Yes,
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            BindValue::Int(_) => <i32 as Type<Postgres>>::type_info(),
            BindValue::Decimal(_) => <Decimal as Type<Postgres>>::type_info(),
            BindValue::Text(_) => <&str as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for BindValue {
    fn type_info() -> PgTypeInfo {
        <&str as Type<Postgres>>::type_info()
    }

    fn compatible(_ty: &PgTypeInfo) -> bool {
        true
    }
}
