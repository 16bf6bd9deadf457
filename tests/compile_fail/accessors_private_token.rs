//! Test that the token of a private field keeps the field's visibility.

mod shop {
    use fieldlens::Accessors;

    #[derive(Accessors)]
    pub struct Item {
        pub name: String,
        price: u32,
    }
}

fn main() {
    let _ = shop::Item::NAME;
    let _ = shop::Item::PRICE;
}
