use std::collections::HashMap;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use crate::entities::car::{self, StringList};
use crate::entities::comment;

struct SeedCar {
    name: &'static str,
    category: &'static str,
    price: &'static str,
    image: &'static str,
    quantity: i32,
    features: &'static [&'static str],
    details: &'static [&'static str],
    tags: &'static [&'static str],
}

const CARS: &[SeedCar] = &[
    SeedCar {
        name: "JETOUR T1",
        category: "SUV / Crossovers",
        price: "120 000 FCFA/day",
        image: "assets/voiture1.jpg",
        quantity: 5,
        features: &[
            "Modern, eye-catching design",
            "Plug-in hybrid: savings & ecology",
            "Central touchscreen, advanced connectivity",
            "Comfortable, quiet ride",
        ],
        details: &[
            "assets/voiture_interieure1_1.jpg",
            "assets/voiture_interieure1_2.jpg",
            "assets/voiture_interieure1_3.jpg",
        ],
        tags: &["SUV", "High-Tech", "Luxe"],
    },
    SeedCar {
        name: "JETOUR DASHING",
        category: "SUV / Crossovers",
        price: "85 000 FCFA/day",
        image: "assets/Voiture2.jpg",
        quantity: 7,
        features: &[
            "7 real family seats",
            "Panoramic roof for a premium experience",
            "Premium audio system",
            "Advanced safety (assists, 360 camera)",
        ],
        details: &[
            "assets/voiture_interieure2_1.jpg",
            "assets/voiture_interieure2_2.jpg",
        ],
        tags: &["SUV", "High-Tech", "Famille", "Confort"],
    },
    SeedCar {
        name: "JMC GRAND AVENUE",
        category: "Pick-up / Utility",
        price: "90 000 FCFA/day",
        image: "assets/voiture3.jpg",
        quantity: 4,
        features: &[
            "Spacious double-cab pickup",
            "Versatile for work & family",
            "Large load/towing capacity",
            "Modern comfort (touchscreen, safety, AC)",
        ],
        details: &["assets/voiture_interieure3_1.jpg"],
        tags: &["Utilitaire", "Robuste"],
    },
    SeedCar {
        name: "JETOUR X670",
        category: "SUV / Crossovers",
        price: "85 000 FCFA/day",
        image: "assets/voiture4.jpg",
        quantity: 6,
        features: &[
            "High-end SUV, luxury and modernity",
            "Spacious premium interior",
            "Advanced on-board technology",
            "Perfect for business trips and events",
        ],
        details: &["assets/voiture_interieure4_1.jpg"],
        tags: &["SUV", "High-Tech", "Luxe", "Affaires"],
    },
    SeedCar {
        name: "JETOUR X50",
        category: "SUV / Crossovers",
        price: "130 000 FCFA/day",
        image: "assets/Voiture5.jpg",
        quantity: 3,
        features: &[
            "Compact, economical urban SUV",
            "Easy to drive, ideal for city and leisure",
            "Smartphone connectivity",
            "Excellent fuel economy",
        ],
        details: &[
            "assets/voiture_interieure5_1.jpg",
            "assets/voiture_interieure5_2.jpg",
        ],
        tags: &["SUV", "High-Tech", "Économique", "Urbain"],
    },
    SeedCar {
        name: "JETOUR T2",
        category: "SUV / Crossovers",
        price: "120 000 FCFA/day",
        image: "assets/media_12.jpg",
        quantity: 5,
        features: &[
            "Modern, rugged adventure-SUV look",
            "Spacious modular interior, ventilated seats, panoramic roof",
            "High-end tech: XXL touchscreen, 12-speaker audio, 360 camera",
            "Real off-road ability: AWD, 7 drive modes, massive trunk",
        ],
        details: &[
            "assets/voiture6_1.jpg",
            "assets/voiture6_2.jpg",
            "assets/voiture6_3.jpg",
        ],
        tags: &["SUV", "High-Tech", "Famille", "Confort"],
    },
];

const COMMENTS: &[(&str, &str, i32, &str)] = &[
    (
        "JETOUR T2",
        "Julien M.",
        5,
        "Incredible vehicle, very powerful and comfortable. Perfect for long family trips.",
    ),
    (
        "JETOUR T2",
        "Sarah L.",
        4,
        "Adventurer look that turns heads. The screen is huge, maybe a bit too much!",
    ),
    (
        "JMC GRAND AVENUE",
        "Patrice K.",
        5,
        "Sturdy and reliable. I used it for a move, its load capacity is impressive.",
    ),
    (
        "JETOUR DASHING",
        "Carine T.",
        4,
        "Very spacious and the panoramic roof is a real plus for the kids.",
    ),
    (
        "JETOUR X50",
        "Alain P.",
        5,
        "Ideal for the city, easy to park and very economical. Top rental service.",
    ),
];

fn string_list(items: &[&str]) -> StringList {
    StringList(items.iter().map(|s| s.to_string()).collect())
}

/// Seed the demo catalog and its comments if the cars table is empty
pub async fn seed_catalog(db: &DatabaseConnection) {
    let existing = car::Entity::find()
        .count(db)
        .await
        .expect("Failed to check for existing cars");

    if existing > 0 {
        return;
    }

    let mut car_ids: HashMap<&str, i32> = HashMap::new();

    for seed in CARS {
        let new_car = car::ActiveModel {
            name: Set(seed.name.to_string()),
            category: Set(Some(seed.category.to_string())),
            price: Set(Some(seed.price.to_string())),
            image: Set(Some(seed.image.to_string())),
            features: Set(string_list(seed.features)),
            details: Set(string_list(seed.details)),
            quantity: Set(seed.quantity),
            tags: Set(string_list(seed.tags)),
            ..Default::default()
        };

        let inserted = new_car.insert(db).await.expect("Failed to seed car");
        car_ids.insert(seed.name, inserted.id);
    }

    for (car_name, author, rating, text) in COMMENTS {
        let Some(&car_id) = car_ids.get(car_name) else {
            continue;
        };

        let new_comment = comment::ActiveModel {
            car_id: Set(car_id),
            author: Set(author.to_string()),
            rating: Set(*rating),
            comment_text: Set(text.to_string()),
            ..Default::default()
        };

        new_comment.insert(db).await.expect("Failed to seed comment");
    }

    tracing::info!("Demo catalog seeded: {} cars, {} comments", CARS.len(), COMMENTS.len());
}
