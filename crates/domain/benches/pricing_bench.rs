use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Cart, CartItem, Money, Points, VoucherCode, VoucherKind, quote};

fn make_item(n: usize) -> CartItem {
    CartItem::new(
        format!("CRS-{n:04}"),
        "Benchmark Course",
        "Benchmark Teacher",
        "Math",
        Money::from_cents(4_999),
        Points::new(500),
        "https://cdn.example.com/cover.png",
    )
}

fn bench_quote(c: &mut Criterion) {
    let items: Vec<CartItem> = (0..20).map(make_item).collect();
    let voucher = VoucherCode::new("SAVE20", VoucherKind::Percentage, 20);

    c.bench_function("pricing/quote_20_items", |b| {
        b.iter(|| quote(&items, Some(&voucher), Points::new(75)));
    });
}

fn bench_cart_mutations(c: &mut Criterion) {
    c.bench_function("cart/add_remove_cycle", |b| {
        b.iter(|| {
            let mut cart = Cart::new();
            for n in 0..20 {
                cart.add_item(make_item(n));
            }
            for n in 0..20 {
                cart.remove_item(&format!("CRS-{n:04}").into());
            }
            cart
        });
    });
}

criterion_group!(benches, bench_quote, bench_cart_mutations);
criterion_main!(benches);
