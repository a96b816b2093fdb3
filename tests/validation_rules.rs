/// End-to-end validation scenarios over the domain shapes
///
/// Each scenario submits a whole candidate record and checks that the
/// record is either accepted or wholly rejected with the offending field
/// named.

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use vetclinic::domain::news::ImagePosition;
use vetclinic::domain::{
    ClientCreate, ClientFields, ClinicFields, DiscountType, NewsBlockFields, NewsCreate,
    PromotionFields, ServiceFields, StaffCreate, StaffFields, UserFields, UserRole,
};

fn base_clinic() -> ClinicFields {
    ClinicFields {
        name: "Friend".to_string(),
        address: "12 Main St".to_string(),
        phone_number: "+79123456789".to_string(),
        email: "info@friend.vet".to_string(),
        is_24_7: false,
        start_time: NaiveTime::from_hms_opt(9, 0, 0),
        end_time: NaiveTime::from_hms_opt(21, 0, 0),
        map_url: None,
        description: None,
        is_active: true,
    }
}

fn base_user() -> UserFields {
    UserFields {
        email: "user@example.com".to_string(),
        first_name: "Ivan".to_string(),
        last_name: "Sidorov".to_string(),
        phone_number: None,
        is_active: true,
    }
}

#[test]
fn clinic_24_7_with_start_time_is_rejected() {
    let clinic = ClinicFields {
        is_24_7: true,
        start_time: NaiveTime::from_hms_opt(9, 0, 0),
        end_time: None,
        ..base_clinic()
    };

    let errors = clinic.validate().unwrap_err();
    assert!(errors.iter().any(|e| e.field == "start_time"));
}

#[test]
fn clinic_hours_invariant_holds_for_both_modes() {
    // 24/7 without time fields: accepted
    let clinic = ClinicFields {
        is_24_7: true,
        start_time: None,
        end_time: None,
        ..base_clinic()
    };
    assert!(clinic.validate().is_ok());

    // non-24/7 needs both fields with end strictly after start
    let clinic = ClinicFields {
        end_time: NaiveTime::from_hms_opt(8, 0, 0),
        ..base_clinic()
    };
    assert!(clinic.validate().is_err());
}

#[test]
fn service_range_fields_must_bracket_the_base_value() {
    let service = ServiceFields {
        name: "Checkup".to_string(),
        short_description: None,
        description: None,
        price: 1000.0,
        min_price: Some(500.0),
        max_price: Some(1500.0),
        duration_minutes: Some(30),
        min_duration: Some(15),
        max_duration: Some(60),
        category: Default::default(),
        status: Default::default(),
        is_popular: false,
        is_available_online: false,
        is_emergency: false,
        preparation_info: None,
        contraindications: None,
        required_specializations: None,
        tags: None,
        image_url: None,
        gallery: None,
        order_index: 0,
        specialist_ids: None,
    };
    assert!(service.validate().is_ok());

    let broken = ServiceFields {
        min_price: Some(1200.0),
        ..service
    };
    let errors = broken.validate().unwrap_err();
    assert_eq!(errors[0].field, "min_price");
}

#[test]
fn promotion_window_and_percentage_bounds() {
    let promo = PromotionFields {
        title: "Spring".to_string(),
        short_description: None,
        description: None,
        discount_type: DiscountType::Percentage,
        discount_value: Some(101.0),
        original_price: None,
        final_price: None,
        start_date: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
        image_url: None,
        gallery: None,
        is_active: true,
        is_featured: false,
        conditions: None,
        promo_code: None,
        clinic_id: None,
        service_ids: None,
    };

    let errors = promo.validate().unwrap_err();
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"end_date"));
    assert!(fields.contains(&"discount_value"));
}

#[test]
fn news_requires_blocks_with_content() {
    let news = NewsCreate {
        title: "Opening".to_string(),
        excerpt: None,
        cover_image: None,
        is_published: true,
        publication_date: None,
        author_id: 1,
        blocks: vec![],
    };
    assert_eq!(news.validate().unwrap_err()[0].field, "blocks");

    let news = NewsCreate {
        blocks: vec![NewsBlockFields {
            title: None,
            text_content: Some("We moved to a bigger building.".to_string()),
            image_url: Some("/media/building.jpg".to_string()),
            image_position: Some(ImagePosition::Right),
            order: 0,
            meta: None,
        }],
        ..news
    };
    assert!(news.validate().is_ok());
}

#[test]
fn staff_password_scenarios_from_the_contract() {
    let staff = StaffCreate {
        password: "abcdef".to_string(),
        staff: StaffFields {
            user: base_user(),
            role: UserRole::Doctor,
            clinic_id: 1,
            specialization: None,
            license_number: None,
        },
    };
    let errors = staff.validate().unwrap_err();
    assert_eq!(errors[0].field, "password");

    let staff = StaffCreate {
        password: "abc123".to_string(),
        ..staff
    };
    assert!(staff.validate().is_ok());
}

#[test]
fn client_with_tomorrows_date_of_birth_is_rejected() {
    let client = ClientCreate {
        password: "abc123".to_string(),
        client: ClientFields {
            user: base_user(),
            date_of_birth: Some(Utc::now().date_naive() + Duration::days(1)),
            address: None,
            emergency_contact: None,
            blood_type: None,
            allergies: None,
            chronic_diseases: None,
        },
    };

    let errors = client.validate().unwrap_err();
    assert_eq!(errors[0].field, "date_of_birth");
}

#[test]
fn client_blood_type_accepts_all_canonical_values() {
    for blood_type in ["A+", "a-", "B+", "b-", "AB+", "ab-", "O+", "o-"] {
        let client = ClientCreate {
            password: "abc123".to_string(),
            client: ClientFields {
                user: base_user(),
                date_of_birth: NaiveDate::from_ymd_opt(1985, 6, 1),
                address: None,
                emergency_contact: None,
                blood_type: Some(blood_type.to_string()),
                allergies: None,
                chronic_diseases: None,
            },
        };
        assert!(client.validate().is_ok(), "rejected {}", blood_type);
    }
}

#[test]
fn any_failing_field_rejects_the_whole_record() {
    // Two independent violations surface together; nothing is applied
    let clinic = ClinicFields {
        start_time: None,
        end_time: None,
        map_url: Some("not-a-url".to_string()),
        ..base_clinic()
    };

    let errors = clinic.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
}
