//! Sale draft: the cart being built at the counter
//!
//! A [`SaleDraft`] collects cart lines, the selected student and the
//! payment method. Once the sale is stored, [`SaleDraft::finalize`] turns it
//! into the immutable [`SaleReceiptRequest`] handed to the renderer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SaleError;
use crate::money::round_money;
use crate::types::{BusinessProfile, LineItem, SaleReceiptRequest, SaleTotals};

/// Student the sale is charged to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub display_name: String,
    /// Enrollment number
    pub reference_code: String,
}

/// Product as returned by the catalog lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub sku: String,
    pub description: String,
    pub unit_price: Decimal,
    /// Fraction, e.g. 0.16 for 16% IVA
    pub tax_rate: Decimal,
    /// Receipts containing this product print the business logo
    #[serde(default)]
    pub print_logo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: i64,
    pub label: String,
}

/// One cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub sku: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub tax_rate: Decimal,
    pub print_logo: bool,
}

impl CartLine {
    fn amount(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Folio printed for a stored sale id, e.g. `F0042`
pub fn folio_for(sale_id: i64) -> String {
    format!("F{:04}", sale_id)
}

#[derive(Debug, Clone, Default)]
pub struct SaleDraft {
    lines: Vec<CartLine>,
    customer: Option<Customer>,
    payment_method: Option<PaymentMethod>,
}

impl SaleDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn select_customer(&mut self, customer: Customer) {
        self.customer = Some(customer);
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    /// Add one unit of a product
    ///
    /// A line with the same SKU and unit price gets its quantity bumped;
    /// otherwise a new line is appended.
    pub fn add_product(&mut self, product: &CatalogProduct) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.sku == product.sku && l.unit_price == product.unit_price)
        {
            line.quantity += 1;
            debug!(sku = %product.sku, quantity = line.quantity, "cart line incremented");
            return;
        }

        self.lines.push(CartLine {
            sku: product.sku.clone(),
            description: product.description.clone(),
            quantity: 1,
            unit_price: product.unit_price,
            tax_rate: product.tax_rate,
            print_logo: product.print_logo,
        });
        debug!(sku = %product.sku, lines = self.lines.len(), "cart line added");
    }

    /// Override the unit price of a line; must be positive
    pub fn set_unit_price(&mut self, index: usize, price: Decimal) -> Result<(), SaleError> {
        if price <= Decimal::ZERO {
            return Err(SaleError::InvalidPrice);
        }
        let line = self
            .lines
            .get_mut(index)
            .ok_or(SaleError::LineNotFound(index))?;
        line.unit_price = price;
        Ok(())
    }

    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<(), SaleError> {
        if quantity < 1 {
            return Err(SaleError::InvalidQuantity);
        }
        let line = self
            .lines
            .get_mut(index)
            .ok_or(SaleError::LineNotFound(index))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove_line(&mut self, index: usize) -> Result<CartLine, SaleError> {
        if index >= self.lines.len() {
            return Err(SaleError::LineNotFound(index));
        }
        Ok(self.lines.remove(index))
    }

    /// Subtotal, tax and total for the current cart
    ///
    /// Tax is each line amount times its product rate, summed once.
    pub fn totals(&self) -> SaleTotals {
        let subtotal: Decimal = self.lines.iter().map(CartLine::amount).sum();
        let tax: Decimal = self.lines.iter().map(|l| l.amount() * l.tax_rate).sum();
        let subtotal = round_money(subtotal);
        let tax_amount = round_money(tax);
        SaleTotals {
            subtotal,
            tax_amount,
            total: subtotal + tax_amount,
        }
    }

    /// Whether any product in the cart asks for the logo
    pub fn print_logo(&self) -> bool {
        self.lines.iter().any(|l| l.print_logo)
    }

    /// Check the draft can be stored as a sale
    pub fn validate(&self) -> Result<(), SaleError> {
        if self.lines.is_empty() {
            return Err(SaleError::EmptyCart);
        }
        if self.customer.is_none() {
            return Err(SaleError::NoCustomer);
        }
        if self.payment_method.is_none() {
            return Err(SaleError::NoPaymentMethod);
        }
        Ok(())
    }

    /// Build the receipt request for a stored sale
    pub fn finalize(
        &self,
        sale_id: i64,
        business: &BusinessProfile,
    ) -> Result<SaleReceiptRequest, SaleError> {
        self.validate()?;
        let customer = self.customer.as_ref().ok_or(SaleError::NoCustomer)?;
        let payment = self
            .payment_method
            .as_ref()
            .ok_or(SaleError::NoPaymentMethod)?;

        Ok(SaleReceiptRequest {
            folio: folio_for(sale_id),
            customer_name: customer.display_name.clone(),
            customer_reference: customer.reference_code.clone(),
            line_items: self
                .lines
                .iter()
                .map(|l| LineItem::new(l.description.clone(), l.quantity, l.unit_price))
                .collect(),
            totals: self.totals(),
            payment_method_label: payment.label.clone(),
            business: business.clone(),
            print_logo: self.print_logo(),
        })
    }

    /// Empty the cart after a completed sale; selections are kept
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
