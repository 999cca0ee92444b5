//! Model-level unit tests.

#[cfg(test)]
mod model_tests {
    use super::super::*;
    use review::{CreateReviewRequest, Review, ReviewSort, ReviewView};

    #[test]
    fn review_new_assigns_identity_and_defaults() {
        let review = Review::new("store-1".to_string(), "user-1".to_string(), 4);
        assert!(!review.id.is_empty());
        assert_eq!(review.store_id, "store-1");
        assert_eq!(review.user_id, "user-1");
        assert_eq!(review.rating, 4);
        assert!(review.content.is_none());
        assert!(review.rating_details.is_none());
    }

    #[test]
    fn sort_mode_parsing_matrix() {
        let cases = [
            (None, ReviewSort::New),
            (Some("new"), ReviewSort::New),
            (Some("liked"), ReviewSort::Liked),
            (Some(" LIKED "), ReviewSort::Liked),
            (Some("popular"), ReviewSort::New),
            (Some(""), ReviewSort::New),
        ];
        for (input, expected) in cases {
            assert_eq!(ReviewSort::from_query(input), expected, "input: {:?}", input);
        }
        assert_eq!(ReviewSort::Liked.as_str(), "liked");
        assert_eq!(ReviewSort::default(), ReviewSort::New);
    }

    #[test]
    fn create_request_defaults_missing_link_lists() {
        let req: CreateReviewRequest =
            serde_json::from_str(r#"{"rating": 6}"#).expect("parse request");
        assert_eq!(req.rating, 6);
        assert!(req.menu_ids.is_empty());
        assert!(req.file_ids.is_empty());
        assert!(req.rating_details.is_none());
    }

    #[test]
    fn review_view_serializes_flat_with_derived_fields() {
        let review = Review::new("store-1".to_string(), "user-1".to_string(), 5);
        let view = ReviewView {
            review: review.clone(),
            menu_ids: vec!["menu-1".to_string()],
            file_ids: Vec::new(),
            likes_count: 3,
            liked_by_me: true,
        };
        let value = serde_json::to_value(&view).expect("serialize");
        assert_eq!(value["id"], review.id.as_str());
        assert_eq!(value["rating"], 5);
        assert_eq!(value["likes_count"], 3);
        assert_eq!(value["liked_by_me"], true);
        assert_eq!(value["menu_ids"][0], "menu-1");
    }

    #[test]
    fn review_row_bincode_roundtrip_preserves_sub_ratings() {
        let mut review = Review::new("store-1".to_string(), "user-1".to_string(), 3);
        review.rating_details = Some(review::RatingDetails {
            taste: Some(5),
            service: Some(2),
            ..Default::default()
        });
        review.content = Some("solid".to_string());
        let encoded = bincode::serialize(&review).expect("encode");
        let decoded: Review = bincode::deserialize(&encoded).expect("decode");
        assert_eq!(decoded, review);
    }
}
