//! 账户与转账流水实体定义

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// 金额
///
/// 定点两位小数，以最小货币单位（分）存储为整数，避免浮点误差。
/// 序列化为十进制字符串，如 `"100.00"`。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    sqlx::Type,
)]
#[serde(into = "Decimal", try_from = "Decimal")]
#[sqlx(transparent)]
pub struct Money(i64);

impl Money {
    /// 小数位数
    pub const SCALE: u32 = 2;

    pub const ZERO: Money = Money(0);

    /// 由最小货币单位构造
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// 由整数金额构造，如 `Money::from_major(1000)` 即 1000.00
    pub const fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    /// 由十进制金额构造，超过两位小数或超出范围时返回 None
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        let scaled = value.checked_mul(Decimal::ONE_HUNDRED)?;
        if !scaled.fract().is_zero() {
            return None;
        }
        scaled.to_i64().map(Self)
    }

    pub fn minor(self) -> i64 {
        self.0
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, Self::SCALE)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::from_decimal(value).ok_or(LedgerError::InvalidAmount(value))
    }
}

/// 账户
///
/// 余额只在转账事务中修改（或由管理操作直接写入种子数据）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub balance: Money,
}

impl Account {
    pub fn new(id: i64, balance: Money) -> Self {
        Self { id, balance }
    }
}

/// 转账流水
///
/// 每次成功转账追加一条，创建后不可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}
