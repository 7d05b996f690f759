//! Shop and collection type conversion functions.

use shopfront_core::{Collection, CollectionId, Paginator, Shop};

use super::super::wire::{CollectionFields, CollectionsPageData, ShopFields, ShopFrontData};
use super::products::{convert_page_info, convert_products};

pub fn convert_shop_front(data: ShopFrontData) -> Shop {
    let ShopFields { name, description } = data.shop;
    Shop {
        name,
        description: description.filter(|d| !d.is_empty()),
        products: convert_products(data.products),
    }
}

pub fn convert_collection(collection: CollectionFields) -> Collection {
    Collection {
        id: CollectionId::new(collection.id),
        handle: collection.handle,
        title: collection.title,
        products: convert_products(collection.products),
    }
}

pub fn convert_collections_page(data: CollectionsPageData) -> Paginator<Vec<Collection>> {
    Paginator::new(
        data.collections
            .edges
            .into_iter()
            .map(|edge| convert_collection(edge.node))
            .collect(),
        convert_page_info(data.collections.page_info),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_convert_shop_front_drops_empty_description() {
        let data: ShopFrontData = serde_json::from_value(json!({
            "shop": { "name": "Naked Pineapple", "description": "" },
            "products": { "edges": [], "pageInfo": {
                "hasNextPage": false, "hasPreviousPage": false,
                "startCursor": null, "endCursor": null
            }}
        }))
        .unwrap();

        let shop = convert_shop_front(data);
        assert_eq!(shop.name, "Naked Pineapple");
        assert_eq!(shop.description, None);
        assert!(shop.products.data.is_empty());
    }

    #[test]
    fn test_convert_collections_page() {
        let data: CollectionsPageData = serde_json::from_value(json!({
            "collections": {
                "edges": [
                    { "node": { "id": "c1", "handle": "frontpage", "title": "Front Page",
                                "products": { "edges": [] } } },
                    { "node": { "id": "c2", "handle": "sale", "title": "Sale",
                                "products": { "edges": [] } } }
                ],
                "pageInfo": {
                    "hasNextPage": true, "hasPreviousPage": false,
                    "startCursor": "c1", "endCursor": "c2"
                }
            }
        }))
        .unwrap();

        let page = convert_collections_page(data);
        let handles: Vec<_> = page.data.iter().map(|c| c.handle.as_str()).collect();
        assert_eq!(handles, vec!["frontpage", "sale"]);
        assert_eq!(page.next_cursor(), Some("c2"));
    }
}
