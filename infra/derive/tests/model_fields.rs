#[test]
fn model_fields_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/model_fields_pass.rs");
    t.compile_fail("tests/ui/model_fields_tuple_struct.rs");
}
