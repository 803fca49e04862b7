//! Sample domain declared by the inspector.

use kmodel::prelude::*;
use tracing::info;

#[derive(Debug, Default, ModelFields)]
pub(crate) struct A {
    #[model(readonly)]
    pub(crate) name: String,
}

#[derive(Debug, Default, ModelFields)]
pub(crate) struct B {
    pub(crate) partner: Option<u64>,
}

#[derive(Debug, Default, ModelFields)]
pub(crate) struct C {
    pub(crate) partner: Option<u64>,
}

#[derive(Debug, Default, ModelFields)]
pub(crate) struct Customer {
    #[model(readonly)]
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) orders: Vec<u64>,
}

#[derive(Debug, Default, ModelFields)]
pub(crate) struct Order {
    #[model(readonly)]
    pub(crate) id: u64,
    pub(crate) customer: Option<u64>,
    pub(crate) lines: Vec<u64>,
    pub(crate) reviewer: Option<u64>,
}

impl Order {
    pub(crate) fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Default, ModelFields)]
pub(crate) struct OrderLine {
    pub(crate) order: Option<u64>,
    pub(crate) product: Option<u64>,
    pub(crate) quantity: u32,
}

#[derive(Debug, Default, ModelFields)]
pub(crate) struct Product {
    pub(crate) sku: String,
}

#[derive(Debug, Default, ModelFields)]
pub(crate) struct Employee {
    pub(crate) name: String,
}

/// Declares `A`, `B extends A` and `B.partner <-> C.partner`.
pub(crate) fn declare_abc() -> Result<(), ModelError> {
    declare_model(|m| {
        m.model_class::<A>(|c| {
            c.attribute_with(A::NAME, |a| {
                a.property("label", "Name").max(64);
            });
            Ok(())
        })?;
        let b = m.model_class::<B>(|c| {
            c.super_class::<A>();
            c.one_to_one(B::PARTNER, C::PARTNER)?;
            Ok(())
        })?;
        info!(class = %b, relations = b.relations().len(), "Declared A/B/C");
        Ok(())
    })
}

/// Declares customers, orders, order lines and products.
pub(crate) fn declare_orders() -> Result<(), ModelError> {
    declare_model(|m| {
        m.model_class::<Customer>(|c| {
            c.property("table", "customers");
            c.attribute(Customer::ID);
            c.mutable_attribute_with(Customer::NAME, |a| {
                a.property("label", "Customer name").min(1).max(120);
            });
            c.one_to_many_with(Customer::ORDERS, Order::CUSTOMER, |r| {
                r.property("cascade", true).reverse(|reverse| {
                    reverse.property("required", true);
                });
            })?;
            Ok(())
        })?;
        m.model_class::<Order>(|c| {
            c.property("table", "orders");
            c.attribute(Order::ID);
            c.function_attribute(function!(Order, line_count));
            c.one_to_many(Order::LINES, OrderLine::ORDER)?;
            c.one_to::<Employee, _>(Order::REVIEWER)?;
            Ok(())
        })?;
        m.model_class::<OrderLine>(|c| {
            c.mutable_attribute_with(OrderLine::QUANTITY, |a| {
                a.min(1).max(999);
            });
            c.one_to::<Product, _>(OrderLine::PRODUCT)?;
            Ok(())
        })?;
        m.model_class::<Product>(|c| {
            c.mutable_attribute(Product::SKU);
            Ok(())
        })?;
        m.model_class::<Employee>(|c| {
            c.mutable_attribute(Employee::NAME);
            Ok(())
        })?;
        info!(classes = m.registry().len(), "Declared order domain");
        Ok(())
    })
}
