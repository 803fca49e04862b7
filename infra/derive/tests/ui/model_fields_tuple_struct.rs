use kmodel::ModelFields;

#[derive(ModelFields)]
pub struct Meters(pub f64);

fn main() {
    let _ = Meters(1.0).0;
}
