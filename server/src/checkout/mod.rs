//! Checkout wizard
//!
//! Three sequential steps (customer info → shipping method → payment), all
//! state held in memory until `finish()` produces the single order-creation
//! payload. Back navigation keeps entered data. No payment gateway is
//! integrated; card/UPI details are shape-validated and discarded.

use crate::cart::Cart;
use crate::db::models::{OrderCreate, OrderCustomer, OrderItem, OrderPayment, PaymentStatus};
use crate::pricing::{ShippingMethod, order_totals, to_decimal, to_f64};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_card_expiry, validate_card_number,
    validate_cvv, validate_email, validate_optional_text, validate_phone, validate_pincode,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wizard position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStep {
    CustomerInfo,
    Shipping,
    Payment,
    Complete,
}

/// Payment method selection (step 3). Card/UPI are client-validated stubs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentMethodInput {
    Cod,
    Card {
        number: String,
        expiry: String,
        cvv: String,
    },
    Upi {
        vpa: String,
    },
}

impl PaymentMethodInput {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethodInput::Cod => "cod",
            PaymentMethodInput::Card { .. } => "card",
            PaymentMethodInput::Upi { .. } => "upi",
        }
    }
}

/// In-memory wizard state. Data entered in an earlier step survives going
/// back and forward again.
#[derive(Debug, Clone)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    cart: Cart,
    customer: Option<OrderCustomer>,
    shipping: Option<ShippingMethod>,
    payment: Option<PaymentMethodInput>,
    customer_note: Option<String>,
    idempotency_key: String,
}

impl CheckoutWizard {
    /// Start a checkout for a non-empty cart
    pub fn new(cart: Cart) -> AppResult<Self> {
        if cart.is_empty() {
            return Err(AppError::validation("cart is empty"));
        }
        Ok(Self {
            step: CheckoutStep::CustomerInfo,
            cart,
            customer: None,
            shipping: None,
            payment: None,
            customer_note: None,
            idempotency_key: Uuid::new_v4().to_string(),
        })
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn idempotency_key(&self) -> &str {
        &self.idempotency_key
    }

    /// Step 1: customer info + address, field-level rules
    pub fn submit_customer_info(&mut self, customer: OrderCustomer) -> AppResult<()> {
        if self.step != CheckoutStep::CustomerInfo {
            return Err(AppError::business_rule("customer info step already completed"));
        }
        validate_required_text(&customer.name, "name", MAX_NAME_LEN)?;
        validate_email(&customer.email)?;
        validate_phone(&customer.phone)?;
        validate_required_text(&customer.address.street, "street", MAX_ADDRESS_LEN)?;
        validate_required_text(&customer.address.city, "city", MAX_NAME_LEN)?;
        validate_required_text(&customer.address.state, "state", MAX_NAME_LEN)?;
        validate_pincode(&customer.address.pincode)?;

        self.customer = Some(customer);
        self.step = CheckoutStep::Shipping;
        Ok(())
    }

    /// Step 2: shipping tier selection
    pub fn select_shipping(&mut self, method: ShippingMethod) -> AppResult<()> {
        if self.step != CheckoutStep::Shipping {
            return Err(AppError::business_rule("not at the shipping step"));
        }
        self.shipping = Some(method);
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Step 3: payment method. Card/UPI fields are validated and then
    /// dropped; only the method label travels with the order.
    pub fn submit_payment(&mut self, payment: PaymentMethodInput) -> AppResult<()> {
        if self.step != CheckoutStep::Payment {
            return Err(AppError::business_rule("not at the payment step"));
        }
        match &payment {
            PaymentMethodInput::Cod => {}
            PaymentMethodInput::Card {
                number,
                expiry,
                cvv,
            } => {
                validate_card_number(number)?;
                validate_card_expiry(expiry)?;
                validate_cvv(cvv)?;
            }
            PaymentMethodInput::Upi { vpa } => {
                if !vpa.contains('@') || vpa.len() < 3 {
                    return Err(AppError::validation(format!("invalid UPI id: {vpa}")));
                }
            }
        }
        self.payment = Some(payment);
        self.step = CheckoutStep::Complete;
        Ok(())
    }

    /// Go back one step. Entered data is kept.
    pub fn back(&mut self) {
        self.step = match self.step {
            CheckoutStep::CustomerInfo | CheckoutStep::Shipping => CheckoutStep::CustomerInfo,
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Complete => CheckoutStep::Payment,
        };
    }

    pub fn set_note(&mut self, note: Option<String>) -> AppResult<()> {
        validate_optional_text(&note, "note", MAX_NOTE_LEN)?;
        self.customer_note = note;
        Ok(())
    }

    /// Produce the order-creation payload with the fully computed money
    /// snapshot. Consumes the wizard.
    pub fn finish(self) -> AppResult<OrderCreate> {
        if self.step != CheckoutStep::Complete {
            return Err(AppError::business_rule("checkout is not complete"));
        }
        // All three steps are Some once step == Complete
        let customer = self
            .customer
            .ok_or_else(|| AppError::internal("missing customer after complete step"))?;
        let shipping = self
            .shipping
            .ok_or_else(|| AppError::internal("missing shipping after complete step"))?;
        let payment = self
            .payment
            .ok_or_else(|| AppError::internal("missing payment after complete step"))?;

        let totals = order_totals(to_decimal(self.cart.subtotal()), shipping);

        let items: Vec<OrderItem> = self
            .cart
            .items
            .iter()
            .map(|i| OrderItem {
                product_id: i.product_id.clone(),
                title: i.title.clone(),
                unit_price: i.unit_price,
                quantity: i.quantity,
                size: i.size.clone(),
                style: i.style.clone(),
                sku: i.sku.clone(),
                image: i.image.clone(),
            })
            .collect();

        Ok(OrderCreate {
            customer,
            items,
            subtotal: to_f64(totals.subtotal),
            shipping_charges: to_f64(totals.shipping_charges),
            tax_amount: to_f64(totals.tax_amount),
            discount_amount: 0.0,
            total_amount: to_f64(totals.total_amount),
            payment: OrderPayment {
                method: payment.label().to_string(),
                status: PaymentStatus::Pending,
                transaction_id: None,
                amount: to_f64(totals.total_amount),
                currency: "INR".to_string(),
            },
            shipping_method: shipping,
            customer_note: self.customer_note,
            idempotency_key: Some(self.idempotency_key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::db::models::OrderAddress;

    fn sample_cart() -> Cart {
        Cart::new().add(CartItem {
            product_id: "product:p1".to_string(),
            title: "Walnut Frame".to_string(),
            sku: "FRM-001".to_string(),
            unit_price: 450.0,
            quantity: 1,
            size: Some("8x10".to_string()),
            style: None,
            image: "/public/products/p1.jpg".to_string(),
        })
    }

    fn sample_customer() -> OrderCustomer {
        OrderCustomer {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: OrderAddress {
                street: "14 Gallery Lane".to_string(),
                city: "Bengaluru".to_string(),
                state: "Karnataka".to_string(),
                pincode: "560001".to_string(),
            },
        }
    }

    #[test]
    fn test_empty_cart_cannot_start() {
        assert!(CheckoutWizard::new(Cart::new()).is_err());
    }

    #[test]
    fn test_full_flow_produces_priced_order() {
        let mut wizard = CheckoutWizard::new(sample_cart()).unwrap();
        wizard.submit_customer_info(sample_customer()).unwrap();
        wizard.select_shipping(ShippingMethod::Express).unwrap();
        wizard.submit_payment(PaymentMethodInput::Cod).unwrap();

        let order = wizard.finish().unwrap();
        assert_eq!(order.subtotal, 450.0);
        assert_eq!(order.shipping_charges, 99.0);
        assert_eq!(order.tax_amount, 98.82);
        assert_eq!(order.total_amount, 647.82);
        assert_eq!(order.payment.method, "cod");
        assert_eq!(order.payment.amount, 647.82);
        assert!(order.idempotency_key.is_some());
    }

    #[test]
    fn test_invalid_customer_fields_rejected() {
        let mut wizard = CheckoutWizard::new(sample_cart()).unwrap();
        let mut bad = sample_customer();
        bad.phone = "12345".to_string();
        assert!(wizard.submit_customer_info(bad).is_err());
        // still at step 1
        assert_eq!(wizard.step(), CheckoutStep::CustomerInfo);
    }

    #[test]
    fn test_card_validation() {
        let mut wizard = CheckoutWizard::new(sample_cart()).unwrap();
        wizard.submit_customer_info(sample_customer()).unwrap();
        wizard.select_shipping(ShippingMethod::Standard).unwrap();

        let bad = PaymentMethodInput::Card {
            number: "4111".to_string(),
            expiry: "09/27".to_string(),
            cvv: "123".to_string(),
        };
        assert!(wizard.submit_payment(bad).is_err());

        let good = PaymentMethodInput::Card {
            number: "4111 1111 1111 1111".to_string(),
            expiry: "09/27".to_string(),
            cvv: "123".to_string(),
        };
        wizard.submit_payment(good).unwrap();
        assert_eq!(wizard.step(), CheckoutStep::Complete);
    }

    #[test]
    fn test_back_navigation_keeps_data() {
        let mut wizard = CheckoutWizard::new(sample_cart()).unwrap();
        wizard.submit_customer_info(sample_customer()).unwrap();
        wizard.select_shipping(ShippingMethod::NextDay).unwrap();
        assert_eq!(wizard.step(), CheckoutStep::Payment);

        wizard.back();
        assert_eq!(wizard.step(), CheckoutStep::Shipping);
        wizard.select_shipping(ShippingMethod::NextDay).unwrap();
        wizard.submit_payment(PaymentMethodInput::Cod).unwrap();

        let order = wizard.finish().unwrap();
        assert_eq!(order.customer.name, "Asha Rao");
        assert_eq!(order.shipping_charges, 199.0);
    }

    #[test]
    fn test_cannot_finish_early() {
        let wizard = CheckoutWizard::new(sample_cart()).unwrap();
        assert!(wizard.finish().is_err());
    }
}
