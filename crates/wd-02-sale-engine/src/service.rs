//! # Sale Engine Service
//!
//! Pay-then-mint. Every check that can fail runs before payment is collected,
//! and the allocator counter only moves after payment succeeded, so a failed
//! `buy` changes nothing.

use crate::domain::{
    compute_final_price, compute_total, invariant_discount_range, invariant_positive_count,
    invariant_supported_decimals, PriceConfig, SaleError, StableCoin,
};
use crate::ports::{SaleApi, StableCoinLedger};
use shared_types::{format_address, Address, DomainEvent, EventLog, TokenId, U256, ZERO_ADDRESS};
use tracing::{debug, info};
use wd_01_identity_allocator::{IdentityAllocator, IdentityAllocatorApi, LedgerError, TokenLedger};

/// Sale engine for one domain.
pub struct SaleEngine<P: StableCoinLedger> {
    config: PriceConfig,
    allocator: IdentityAllocator,
    payments: P,
    admin: Address,
    proceeds_holder: Address,
}

impl<P: StableCoinLedger> SaleEngine<P> {
    /// Create a sale engine.
    ///
    /// `proceeds_holder` is the account that receives payments and is the
    /// spender buyers approve.
    pub fn new(
        config: PriceConfig,
        allocator: IdentityAllocator,
        payments: P,
        admin: Address,
        proceeds_holder: Address,
    ) -> Result<Self, SaleError> {
        invariant_discount_range(config.discount_bps)?;
        for coin in &config.stable_coins {
            invariant_supported_decimals(coin.token, coin.decimals)?;
        }
        Ok(Self {
            config,
            allocator,
            payments,
            admin,
            proceeds_holder,
        })
    }

    /// Current price configuration.
    pub fn config(&self) -> &PriceConfig {
        &self.config
    }

    /// Identifier allocator.
    pub fn allocator(&self) -> &IdentityAllocator {
        &self.allocator
    }

    /// Identifier allocator, for allocations outside a sale.
    pub fn allocator_mut(&mut self) -> &mut IdentityAllocator {
        &mut self.allocator
    }

    /// Payment ledger.
    pub fn payments(&self) -> &P {
        &self.payments
    }

    /// Account holding sale proceeds.
    pub fn proceeds_holder(&self) -> Address {
        self.proceeds_holder
    }

    /// Sale administrator.
    pub fn admin(&self) -> Address {
        self.admin
    }

    fn ensure_admin(&self, caller: Address) -> Result<(), SaleError> {
        if caller != self.admin {
            return Err(SaleError::NotAuthorized(caller));
        }
        Ok(())
    }
}

impl<P: StableCoinLedger> SaleApi for SaleEngine<P> {
    fn final_price(&self, token: &Address) -> Result<U256, SaleError> {
        let coin = self
            .config
            .stable_coin(token)
            .ok_or(SaleError::UnknownStableCoin(*token))?;
        compute_final_price(
            self.config.base_price_cents,
            self.config.discount_bps,
            coin.decimals,
        )
    }

    fn buy(
        &mut self,
        ledger: &mut TokenLedger,
        buyer: Address,
        token: Address,
        count: u64,
        events: &mut EventLog,
    ) -> Result<Vec<TokenId>, SaleError> {
        invariant_positive_count(count)?;
        if buyer == ZERO_ADDRESS {
            return Err(LedgerError::ZeroAddress.into());
        }
        let total = compute_total(self.final_price(&token)?, count)?;

        let planned = self.allocator.peek_batch(count)?;
        if let Some(taken) = planned.iter().find(|id| ledger.exists(**id)) {
            return Err(LedgerError::TokenAlreadyExists(*taken).into());
        }

        self.payments
            .transfer_from(&token, &self.proceeds_holder, &buyer, &self.proceeds_holder, total)
            .map_err(|e| {
                debug!("[wd-02] Payment refused for {}: {}", format_address(&buyer), e);
                SaleError::from(e)
            })?;

        let ids = self.allocator.allocate_batch(count)?;
        for id in &ids {
            ledger.mint(buyer, *id, events)?;
        }

        info!(
            "[wd-02] Sold {} id(s) to {} for {} ({})",
            count,
            format_address(&buyer),
            total,
            format_address(&token)
        );
        Ok(ids)
    }

    fn set_price(
        &mut self,
        caller: Address,
        cents: u32,
        events: &mut EventLog,
    ) -> Result<(), SaleError> {
        self.ensure_admin(caller)?;
        self.config.base_price_cents = cents;
        info!("[wd-02] Base price set to {} cents", cents);
        events.emit(DomainEvent::PriceSet { cents });
        Ok(())
    }

    fn set_discount(
        &mut self,
        caller: Address,
        basis_points: u32,
        events: &mut EventLog,
    ) -> Result<(), SaleError> {
        self.ensure_admin(caller)?;
        invariant_discount_range(basis_points)?;
        self.config.discount_bps = basis_points;
        info!("[wd-02] Discount set to {} bps", basis_points);
        events.emit(DomainEvent::DiscountSet { basis_points });
        Ok(())
    }

    fn set_stable_coin(
        &mut self,
        caller: Address,
        token: Address,
        active: bool,
        events: &mut EventLog,
    ) -> Result<(), SaleError> {
        self.ensure_admin(caller)?;
        if active {
            let decimals = self.payments.decimals(&token)?;
            invariant_supported_decimals(token, decimals)?;
            self.config.accept(token, decimals);
        } else if !self.config.reject(&token) {
            return Err(SaleError::UnknownStableCoin(token));
        }
        info!(
            "[wd-02] Stable coin {} {}",
            format_address(&token),
            if active { "accepted" } else { "removed" }
        );
        events.emit(DomainEvent::StableCoinSet { token, active });
        Ok(())
    }

    fn stable_coins(&self) -> Vec<StableCoin> {
        self.config.stable_coins.clone()
    }

    fn set_max_token_id(
        &mut self,
        caller: Address,
        value: TokenId,
        events: &mut EventLog,
    ) -> Result<TokenId, SaleError> {
        self.ensure_admin(caller)?;
        let max_token_id = self.allocator.set_max_token_id(value)?;
        events.emit(DomainEvent::MaxTokenIdSet { max_token_id });
        Ok(max_token_id)
    }

    fn withdraw_proceeds(
        &mut self,
        caller: Address,
        beneficiary: Address,
        token: Address,
        amount: U256,
        events: &mut EventLog,
    ) -> Result<U256, SaleError> {
        self.ensure_admin(caller)?;
        if beneficiary == ZERO_ADDRESS {
            return Err(LedgerError::ZeroAddress.into());
        }
        let amount = if amount.is_zero() {
            self.payments.balance_of(&token, &self.proceeds_holder)
        } else {
            amount
        };
        self.payments
            .transfer(&token, &self.proceeds_holder, &beneficiary, amount)?;

        info!(
            "[wd-02] Withdrew {} of {} to {}",
            amount,
            format_address(&token),
            format_address(&beneficiary)
        );
        events.emit(DomainEvent::ProceedsWithdrawn {
            token,
            beneficiary,
            amount,
        });
        Ok(amount)
    }
}
