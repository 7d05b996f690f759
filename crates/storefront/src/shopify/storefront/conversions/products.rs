//! Product type conversion functions.

use shopfront_core::{Image, Money, PageInfo, Paginator, Product, ProductId, Variant, VariantId};

use super::super::wire::{
    Connection, ImageFields, MoneyFields, PageInfoFields, ProductFields, VariantFields,
};

/// Convert wire page info; a missing `pageInfo` means a single, complete page.
pub fn convert_page_info(page_info: Option<PageInfoFields>) -> PageInfo {
    let fields = page_info.unwrap_or_default();
    PageInfo {
        has_next_page: fields.has_next_page,
        has_previous_page: fields.has_previous_page,
        start_cursor: fields.start_cursor,
        end_cursor: fields.end_cursor,
    }
}

/// Convert a product connection into a page of products.
pub fn convert_products(connection: Connection<ProductFields>) -> Paginator<Vec<Product>> {
    Paginator::new(
        connection
            .edges
            .into_iter()
            .map(|edge| convert_product(edge.node))
            .collect(),
        convert_page_info(connection.page_info),
    )
}

fn convert_product(product: ProductFields) -> Product {
    Product {
        id: ProductId::new(product.id),
        handle: product.handle,
        title: product.title,
        description: product.description,
        images: product
            .images
            .edges
            .into_iter()
            .map(|edge| convert_image(edge.node))
            .collect(),
        variants: Paginator::new(
            product
                .variants
                .edges
                .into_iter()
                .map(|edge| convert_variant(edge.node))
                .collect(),
            convert_page_info(product.variants.page_info),
        ),
    }
}

fn convert_variant(variant: VariantFields) -> Variant {
    Variant {
        id: VariantId::new(variant.id),
        title: variant.title,
        image: variant.image.map(convert_image),
        price: convert_money(variant.price),
    }
}

fn convert_image(image: ImageFields) -> Image {
    Image { src: image.src }
}

fn convert_money(money: MoneyFields) -> Money {
    Money::new(money.amount, money.currency_code)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_convert_products_flattens_edges() {
        let connection: Connection<ProductFields> = serde_json::from_value(json!({
            "edges": [{
                "node": {
                    "id": "gid://shopify/Product/1",
                    "handle": "glow-oil",
                    "title": "Glow Oil",
                    "description": "Bronzing facial oil",
                    "images": { "edges": [{ "node": { "src": "https://cdn.example/1.png" } }] },
                    "variants": {
                        "edges": [{
                            "node": {
                                "id": "gid://shopify/ProductVariant/11",
                                "title": "30ml",
                                "image": null,
                                "price": { "amount": "34.0", "currencyCode": "USD" }
                            }
                        }],
                        "pageInfo": {
                            "hasNextPage": true,
                            "hasPreviousPage": false,
                            "startCursor": "v1",
                            "endCursor": "v1"
                        }
                    }
                }
            }],
            "pageInfo": {
                "hasNextPage": false,
                "hasPreviousPage": true,
                "startCursor": "p1",
                "endCursor": "p1"
            }
        }))
        .unwrap();

        let page = convert_products(connection);
        assert!(!page.has_next_page());
        assert!(page.page_info.has_previous_page);

        let product = page.data.first().unwrap();
        assert_eq!(product.id.as_str(), "gid://shopify/Product/1");
        assert_eq!(product.featured_image().unwrap().src, "https://cdn.example/1.png");

        let variant = product.variants.data.first().unwrap();
        assert_eq!(variant.price, Money::new(Decimal::new(340, 1), "USD"));
        assert!(product.variants.has_next_page());
        assert_eq!(product.variants.next_cursor(), Some("v1"));
    }

    #[test]
    fn test_missing_page_info_is_single_page() {
        let page_info = convert_page_info(None);
        assert_eq!(page_info, PageInfo::default());
    }
}
