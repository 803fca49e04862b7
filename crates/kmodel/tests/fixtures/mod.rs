#![allow(dead_code)]

use kmodel::prelude::*;

#[derive(Debug, Clone, Default, ModelFields)]
pub struct A {
    #[model(readonly)]
    pub name: String,
}

#[derive(Debug, Clone, Default, ModelFields)]
pub struct B {
    pub name: String,
    pub partner: Option<u64>,
}

#[derive(Debug, Clone, Default, ModelFields)]
pub struct C {
    pub partner: Option<u64>,
    pub label: String,
}

#[derive(Debug, Clone, Default, ModelFields)]
pub struct Customer {
    #[model(readonly)]
    pub id: u64,
    pub name: String,
    pub orders: Vec<u64>,
}

#[derive(Debug, Clone, Default, ModelFields)]
pub struct Order {
    #[model(readonly)]
    pub id: u64,
    pub customer: Option<u64>,
    pub lines: Vec<u64>,
}

impl Order {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Clone, Default, ModelFields)]
pub struct OrderLine {
    pub order: Option<u64>,
    pub product: Option<u64>,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, ModelFields)]
pub struct Product {
    pub sku: String,
}

#[derive(Debug, Clone, Default, ModelFields)]
pub struct Employee {
    pub manager: Option<u64>,
    pub reports: Vec<u64>,
}

#[derive(Debug, Clone, Default, ModelFields)]
pub struct Person {
    pub spouse: Option<u64>,
}

/// A with a read-only `name`, B extending A with `B.partner <-> C.partner`, and C.
pub fn declare_abc(registry: &ModelRegistry) -> Result<(), ModelError> {
    registry.declare(|m| {
        m.model_class::<A>(|c| {
            c.attribute(A::NAME);
            Ok(())
        })?;
        m.model_class::<B>(|c| {
            c.super_class::<A>();
            c.one_to_one(B::PARTNER, C::PARTNER)?;
            Ok(())
        })?;
        m.model_class::<C>(|_| Ok(()))?;
        Ok(())
    })
}

/// A small order domain using every relation kind.
pub fn declare_orders(registry: &ModelRegistry) -> Result<(), ModelError> {
    registry.declare(|m| {
        m.model_class::<Customer>(|c| {
            c.property("table", "customers");
            c.attribute(Customer::ID);
            c.mutable_attribute_with(Customer::NAME, |a| {
                a.property("label", "Name").max(120);
            });
            c.one_to_many_with(Customer::ORDERS, Order::CUSTOMER, |r| {
                r.property("cascade", true).reverse(|reverse| {
                    reverse.property("required", true);
                });
            })?;
            Ok(())
        })?;
        m.model_class::<Order>(|c| {
            c.attribute(Order::ID);
            c.function_attribute(kmodel::function!(Order, line_count));
            c.one_to_many(Order::LINES, OrderLine::ORDER)?;
            Ok(())
        })?;
        m.model_class::<OrderLine>(|c| {
            c.mutable_attribute_with(OrderLine::QUANTITY, |a| {
                a.min(1).max(999);
            });
            c.one_to::<Product, _>(OrderLine::PRODUCT)?;
            Ok(())
        })?;
        m.model_class::<Employee>(|c| {
            c.many_to_one(Employee::MANAGER, Employee::REPORTS)?;
            Ok(())
        })?;
        m.model_class::<Person>(|c| {
            c.one_to_one(Person::SPOUSE, Person::SPOUSE)?;
            Ok(())
        })?;
        Ok(())
    })
}
