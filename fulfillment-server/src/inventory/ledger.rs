//! Inventory Ledger - 食材库存账本
//!
//! 持有食材库存，只通过 check-and-deduct / restore 两个操作变更。
//! 扣减是全或无：任何一个配方行不足，整个调用不落任何变更。
//!
//! 并发模型：所有扣减/归还在一把账本锁内串行执行，保证同一食材上的
//! 扣减是线性一致的——两个并发订单争抢同一食材时，不可能都通过
//! 充足性检查而超扣库存。锁只覆盖扣减/归还临界区，协作者查询
//! （桌台、菜品）不持有它。

use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use shared::models::{Ingredient, MenuItem};
use shared::order::StockDeduction;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// 配方引用了账本中不存在的食材
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(i64),

    #[error(
        "Insufficient stock for ingredient {name} (id {ingredient_id}): required {required}, available {available}"
    )]
    InsufficientStock {
        ingredient_id: i64,
        name: String,
        required: Decimal,
        available: Decimal,
    },
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// 库存账本
#[derive(Debug, Default)]
pub struct InventoryLedger {
    ingredients: DashMap<i64, Ingredient>,
    /// 扣减/归还临界区
    deduct_lock: Mutex<()>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记/更新一个食材（由周边系统的 CRUD 面调用）
    pub fn put(&self, ingredient: Ingredient) {
        self.ingredients.insert(ingredient.id, ingredient);
    }

    pub fn get(&self, ingredient_id: i64) -> Option<Ingredient> {
        self.ingredients.get(&ingredient_id).map(|i| i.clone())
    }

    /// 当前库存（不存在返回 0）
    pub fn stock_of(&self, ingredient_id: i64) -> Decimal {
        self.ingredients
            .get(&ingredient_id)
            .map(|i| i.stock)
            .unwrap_or(Decimal::ZERO)
    }

    /// Check-and-deduct: 为 `quantity` 份菜品扣减配方所需食材
    ///
    /// 两阶段执行于同一临界区内：先把配方行按食材合计需求量并校验
    /// 库存充足，再统一扣减。任一食材不足立即失败，此时没有任何
    /// 食材被变更。
    ///
    /// 空配方总是成功且零副作用（配方是可选的，缺失表示该菜品
    /// 不做食材追踪）。
    ///
    /// 返回实际扣减的精确数额，调用方应把它快照到订单上，
    /// 取消时按快照归还。
    pub fn check_and_deduct(
        &self,
        item: &MenuItem,
        quantity: i32,
    ) -> LedgerResult<Vec<StockDeduction>> {
        if item.recipe.is_empty() {
            return Ok(Vec::new());
        }

        let _guard = self.deduct_lock.lock();

        // 同一食材可能出现在多个配方行上：先按食材合计需求量，
        // 充足性必须对合计值成立，否则逐行校验会放过超扣
        let mut required_totals: BTreeMap<i64, Decimal> = BTreeMap::new();
        for line in &item.recipe {
            *required_totals.entry(line.ingredient_id).or_default() +=
                line.quantity_per_unit * Decimal::from(quantity);
        }

        // Phase 1: sufficiency check, no mutation
        for (&ingredient_id, &required) in &required_totals {
            let ingredient = self
                .ingredients
                .get(&ingredient_id)
                .ok_or(LedgerError::IngredientNotFound(ingredient_id))?;
            if ingredient.stock < required {
                tracing::warn!(
                    menu_item = %item.name,
                    ingredient = %ingredient.name,
                    required = %required,
                    available = %ingredient.stock,
                    "Insufficient stock, rejecting deduction"
                );
                return Err(LedgerError::InsufficientStock {
                    ingredient_id: ingredient.id,
                    name: ingredient.name.clone(),
                    required,
                    available: ingredient.stock,
                });
            }
        }

        // Phase 2: apply, one deduction per ingredient
        let mut deductions = Vec::with_capacity(required_totals.len());
        for (&ingredient_id, &required) in &required_totals {
            if let Some(mut ingredient) = self.ingredients.get_mut(&ingredient_id) {
                ingredient.stock -= required;
                ingredient.version += 1;
                deductions.push(StockDeduction {
                    ingredient_id,
                    amount: required,
                });
            }
        }

        tracing::debug!(
            menu_item = %item.name,
            quantity,
            deducted_lines = deductions.len(),
            "Stock deducted"
        );
        Ok(deductions)
    }

    /// Restore: 按扣减快照原额归还库存
    ///
    /// 永不失败，也不设上限——归还总是安全的。快照里的食材若已被
    /// 目录面删除则跳过该行。
    pub fn restore(&self, deductions: &[StockDeduction]) {
        if deductions.is_empty() {
            return;
        }
        let _guard = self.deduct_lock.lock();
        for deduction in deductions {
            if let Some(mut ingredient) = self.ingredients.get_mut(&deduction.ingredient_id) {
                ingredient.stock += deduction.amount;
                ingredient.version += 1;
            } else {
                tracing::warn!(
                    ingredient_id = deduction.ingredient_id,
                    amount = %deduction.amount,
                    "Restore skipped: ingredient no longer exists"
                );
            }
        }
        tracing::debug!(restored_lines = deductions.len(), "Stock restored");
    }
}
