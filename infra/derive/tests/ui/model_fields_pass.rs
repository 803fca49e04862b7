use kmodel::{FieldAccessor, ModelFields, MutableFieldAccessor};

#[derive(ModelFields)]
pub struct Customer {
    #[model(readonly)]
    pub id: u64,
    pub name: String,
    #[model(skip)]
    cache: Vec<u8>,
    r#type: String,
}

fn main() {
    let mut customer =
        Customer { id: 7, name: "Ada".to_owned(), cache: Vec::new(), r#type: "vip".to_owned() };

    Customer::NAME.write(&mut customer, "Grace".to_owned());
    Customer::TYPE.write(&mut customer, "regular".to_owned());

    assert_eq!(Customer::NAME.read(&customer), "Grace");
    assert_eq!(Customer::ID.read(&customer), 7);
    assert_eq!(Customer::TYPE.name(), "type");
    assert_eq!(customer.r#type, "regular");
    assert!(customer.cache.is_empty());
}
