//! Canonical demo dataset: Italian luxury fashion supply chain
//!
//! 28 records and 40 edges covering suppliers, materials, factories,
//! certifications, collections, and products.

use super::property::PropertyMap;
use super::record::Record;
use super::store::RecordStore;
use super::types::{EdgeKind, Label};
use tracing::info;

fn props(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), (*v).into()))
        .collect()
}

/// Build the canonical supply chain store
///
/// Infallible by construction: all ids are unique and every edge references
/// a record inserted above it.
pub fn supply_chain() -> RecordStore {
    let mut store = RecordStore::new();

    let suppliers: &[(&str, &[(&str, &str)])] = &[
        (
            "SUP001",
            &[
                ("name", "Tuscany Leather Consortium"),
                ("location", "Florence, Italy"),
                ("country", "Italy"),
                ("type", "Leather Supplier"),
                ("established", "1947"),
                ("employees", "250"),
                ("sustainability_rating", "A+"),
            ],
        ),
        (
            "SUP002",
            &[
                ("name", "Como Silk Mills"),
                ("location", "Como, Italy"),
                ("country", "Italy"),
                ("type", "Textile Supplier"),
                ("established", "1920"),
                ("employees", "180"),
                ("sustainability_rating", "A"),
            ],
        ),
        (
            "SUP003",
            &[
                ("name", "Biella Wool Producers"),
                ("location", "Biella, Italy"),
                ("country", "Italy"),
                ("type", "Wool Supplier"),
                ("established", "1885"),
                ("employees", "320"),
                ("sustainability_rating", "A"),
            ],
        ),
        (
            "SUP004",
            &[
                ("name", "Veneto Textile Group"),
                ("location", "Venice, Italy"),
                ("country", "Italy"),
                ("type", "Textile Supplier"),
                ("established", "1965"),
                ("employees", "150"),
                ("sustainability_rating", "B+"),
            ],
        ),
        (
            "SUP005",
            &[
                ("name", "Marche Leather Artisans"),
                ("location", "Marche, Italy"),
                ("country", "Italy"),
                ("type", "Leather Supplier"),
                ("established", "1978"),
                ("employees", "95"),
                ("sustainability_rating", "A"),
            ],
        ),
    ];
    for (id, p) in suppliers {
        store
            .insert(Record::with_properties(*id, Label::Supplier, props(p)))
            .expect("seed supplier ids are unique");
    }

    let materials: &[(&str, &[(&str, &str)])] = &[
        (
            "MAT001",
            &[
                ("name", "Premium Calf Leather"),
                ("type", "Leather"),
                ("origin", "Italian Calves"),
                ("grade", "A+"),
                ("tanning_method", "Vegetable Tanning"),
                ("sustainability", "High"),
            ],
        ),
        (
            "MAT002",
            &[
                ("name", "Mulberry Silk"),
                ("type", "Silk"),
                ("origin", "Italian Silkworms"),
                ("grade", "A"),
                ("weight", "19 momme"),
                ("sustainability", "High"),
            ],
        ),
        (
            "MAT003",
            &[
                ("name", "Merino Wool"),
                ("type", "Wool"),
                ("origin", "Italian Merino Sheep"),
                ("grade", "Superfine"),
                ("treatment", "Organic"),
                ("sustainability", "Very High"),
            ],
        ),
        (
            "MAT004",
            &[
                ("name", "Cashmere"),
                ("type", "Wool"),
                ("origin", "Mongolian Goats"),
                ("grade", "Grade A"),
                ("softness", "Ultra Soft"),
                ("sustainability", "Medium"),
            ],
        ),
        (
            "MAT005",
            &[
                ("name", "Exotic Python Leather"),
                ("type", "Leather"),
                ("origin", "Certified Python Farms"),
                ("grade", "A"),
                ("treatment", "Chrome Tanning"),
                ("sustainability", "Regulated"),
            ],
        ),
        (
            "MAT006",
            &[
                ("name", "Organic Cotton"),
                ("type", "Cotton"),
                ("origin", "Italian Organic Farms"),
                ("grade", "GOTS Certified"),
                ("finish", "Mercerized"),
                ("sustainability", "Very High"),
            ],
        ),
    ];
    for (id, p) in materials {
        store
            .insert(Record::with_properties(*id, Label::Material, props(p)))
            .expect("seed material ids are unique");
    }

    let factories: &[(&str, &[(&str, &str)])] = &[
        (
            "FAC001",
            &[
                ("name", "Gucci Artisan Workshop"),
                ("location", "Florence, Italy"),
                ("country", "Italy"),
                ("type", "Leather Goods Manufacturing"),
                ("capacity", "50000 units/year"),
                ("employees", "450"),
            ],
        ),
        (
            "FAC002",
            &[
                ("name", "Prada Manufacturing Hub"),
                ("location", "Milan, Italy"),
                ("country", "Italy"),
                ("type", "Handbag & Accessories"),
                ("capacity", "75000 units/year"),
                ("employees", "620"),
            ],
        ),
        (
            "FAC003",
            &[
                ("name", "Bottega Veneta Atelier"),
                ("location", "Vicenza, Italy"),
                ("country", "Italy"),
                ("type", "Leather Weaving"),
                ("capacity", "30000 units/year"),
                ("employees", "280"),
            ],
        ),
        (
            "FAC004",
            &[
                ("name", "Loro Piana Textile Mill"),
                ("location", "Biella, Italy"),
                ("country", "Italy"),
                ("type", "Textile & Garment"),
                ("capacity", "100000 units/year"),
                ("employees", "380"),
            ],
        ),
    ];
    for (id, p) in factories {
        store
            .insert(Record::with_properties(*id, Label::Factory, props(p)))
            .expect("seed factory ids are unique");
    }

    let certifications: &[(&str, &[(&str, &str)])] = &[
        (
            "CERT001",
            &[
                ("name", "Made in Italy"),
                ("type", "Origin Certification"),
                ("issuing_body", "Italian Ministry of Economic Development"),
                ("valid_from", "2020-01-01"),
                ("valid_until", "2025-12-31"),
                ("verification_url", "https://madeinitaly.gov.it"),
            ],
        ),
        (
            "CERT002",
            &[
                ("name", "LWG Gold Rating"),
                ("type", "Environmental Certification"),
                ("issuing_body", "Leather Working Group"),
                ("valid_from", "2022-06-01"),
                ("valid_until", "2025-06-01"),
                ("verification_url", "https://www.leatherworkinggroup.com"),
            ],
        ),
        (
            "CERT003",
            &[
                ("name", "GOTS Organic"),
                ("type", "Organic Certification"),
                ("issuing_body", "Global Organic Textile Standard"),
                ("valid_from", "2021-03-15"),
                ("valid_until", "2026-03-15"),
                ("verification_url", "https://global-standard.org"),
            ],
        ),
        (
            "CERT004",
            &[
                ("name", "CITES Permit"),
                ("type", "Wildlife Trade Certification"),
                (
                    "issuing_body",
                    "Convention on International Trade in Endangered Species",
                ),
                ("valid_from", "2023-01-01"),
                ("valid_until", "2024-12-31"),
                ("verification_url", "https://cites.org"),
            ],
        ),
        (
            "CERT005",
            &[
                ("name", "ISO 9001:2015"),
                ("type", "Quality Management"),
                (
                    "issuing_body",
                    "International Organization for Standardization",
                ),
                ("valid_from", "2020-09-01"),
                ("valid_until", "2026-09-01"),
                ("verification_url", "https://www.iso.org"),
            ],
        ),
        (
            "CERT006",
            &[
                ("name", "SA 8000"),
                ("type", "Social Accountability"),
                ("issuing_body", "Social Accountability International"),
                ("valid_from", "2021-11-01"),
                ("valid_until", "2025-11-01"),
                ("verification_url", "https://sa-intl.org"),
            ],
        ),
    ];
    for (id, p) in certifications {
        store
            .insert(Record::with_properties(*id, Label::Certification, props(p)))
            .expect("seed certification ids are unique");
    }

    let collections: &[(&str, &[(&str, &str)])] = &[
        (
            "COL001",
            &[
                ("name", "Spring/Summer 2024"),
                ("year", "2024"),
                ("season", "SS"),
                ("brand", "Gucci"),
                ("theme", "Renaissance Revival"),
            ],
        ),
        (
            "COL002",
            &[
                ("name", "Fall/Winter 2024"),
                ("year", "2024"),
                ("season", "FW"),
                ("brand", "Prada"),
                ("theme", "Urban Elegance"),
            ],
        ),
        (
            "COL003",
            &[
                ("name", "Cruise 2024"),
                ("year", "2024"),
                ("season", "Cruise"),
                ("brand", "Bottega Veneta"),
                ("theme", "Mediterranean Dreams"),
            ],
        ),
    ];
    for (id, p) in collections {
        store
            .insert(Record::with_properties(*id, Label::Collection, props(p)))
            .expect("seed collection ids are unique");
    }

    let products: &[(&str, &[(&str, &str)])] = &[
        (
            "PROD001",
            &[
                ("name", "Dionysus Leather Handbag"),
                ("sku", "GG-DIO-2024-001"),
                ("category", "Handbag"),
                ("price_eur", "2500"),
                ("made_in", "Italy"),
            ],
        ),
        (
            "PROD002",
            &[
                ("name", "Galleria Saffiano Tote"),
                ("sku", "PR-GAL-2024-045"),
                ("category", "Tote Bag"),
                ("price_eur", "3200"),
                ("made_in", "Italy"),
            ],
        ),
        (
            "PROD003",
            &[
                ("name", "Intrecciato Woven Clutch"),
                ("sku", "BV-INT-2024-023"),
                ("category", "Clutch"),
                ("price_eur", "1800"),
                ("made_in", "Italy"),
            ],
        ),
        (
            "PROD004",
            &[
                ("name", "Cashmere Overcoat"),
                ("sku", "LP-CAS-2024-012"),
                ("category", "Outerwear"),
                ("price_eur", "4500"),
                ("made_in", "Italy"),
            ],
        ),
    ];
    for (id, p) in products {
        store
            .insert(Record::with_properties(*id, Label::Product, props(p)))
            .expect("seed product ids are unique");
    }

    use EdgeKind::*;
    let edges: &[(&str, &str, EdgeKind, &[(&str, &str)])] = &[
        // Supplier -> Material
        ("SUP001", "MAT001", Provides, &[("since", "2015"), ("volume", "High")]),
        ("SUP001", "MAT005", Provides, &[("since", "2018"), ("volume", "Low")]),
        ("SUP002", "MAT002", Provides, &[("since", "2010"), ("volume", "High")]),
        ("SUP003", "MAT003", Provides, &[("since", "2005"), ("volume", "Very High")]),
        ("SUP003", "MAT004", Provides, &[("since", "2012"), ("volume", "Medium")]),
        ("SUP004", "MAT006", Provides, &[("since", "2019"), ("volume", "Medium")]),
        ("SUP005", "MAT001", Provides, &[("since", "2020"), ("volume", "Medium")]),
        // Material -> Factory
        ("MAT001", "FAC001", SuppliedTo, &[("quantity", "5000 sq meters"), ("frequency", "Monthly")]),
        ("MAT001", "FAC002", SuppliedTo, &[("quantity", "7500 sq meters"), ("frequency", "Monthly")]),
        ("MAT001", "FAC003", SuppliedTo, &[("quantity", "3000 sq meters"), ("frequency", "Bi-weekly")]),
        ("MAT002", "FAC004", SuppliedTo, &[("quantity", "2000 meters"), ("frequency", "Weekly")]),
        ("MAT003", "FAC004", SuppliedTo, &[("quantity", "10000 kg"), ("frequency", "Monthly")]),
        ("MAT004", "FAC004", SuppliedTo, &[("quantity", "1500 kg"), ("frequency", "Quarterly")]),
        ("MAT005", "FAC002", SuppliedTo, &[("quantity", "500 skins"), ("frequency", "Quarterly")]),
        ("MAT006", "FAC004", SuppliedTo, &[("quantity", "5000 meters"), ("frequency", "Monthly")]),
        // Factory -> Product
        ("FAC001", "PROD001", Manufactures, &[("lead_time", "45 days"), ("batch_size", "500")]),
        ("FAC002", "PROD002", Manufactures, &[("lead_time", "30 days"), ("batch_size", "1000")]),
        ("FAC003", "PROD003", Manufactures, &[("lead_time", "60 days"), ("batch_size", "300")]),
        ("FAC004", "PROD004", Manufactures, &[("lead_time", "90 days"), ("batch_size", "200")]),
        // Product -> Collection
        ("PROD001", "COL001", PartOf, &[("featured", "Yes")]),
        ("PROD002", "COL002", PartOf, &[("featured", "Yes")]),
        ("PROD003", "COL003", PartOf, &[("featured", "Yes")]),
        ("PROD004", "COL002", PartOf, &[("featured", "No")]),
        // Supplier certifications
        ("SUP001", "CERT001", HasCertification, &[("verified_date", "2023-06-15")]),
        ("SUP001", "CERT002", HasCertification, &[("verified_date", "2022-11-20")]),
        ("SUP002", "CERT001", HasCertification, &[("verified_date", "2023-03-10")]),
        ("SUP003", "CERT001", HasCertification, &[("verified_date", "2023-01-05")]),
        ("SUP003", "CERT003", HasCertification, &[("verified_date", "2021-08-22")]),
        ("SUP004", "CERT003", HasCertification, &[("verified_date", "2022-04-18")]),
        ("SUP005", "CERT001", HasCertification, &[("verified_date", "2023-09-30")]),
        // Factory certifications
        ("FAC001", "CERT001", HasCertification, &[("verified_date", "2023-07-12")]),
        ("FAC001", "CERT005", HasCertification, &[("verified_date", "2020-09-15")]),
        ("FAC002", "CERT001", HasCertification, &[("verified_date", "2023-05-20")]),
        ("FAC002", "CERT005", HasCertification, &[("verified_date", "2021-02-10")]),
        ("FAC002", "CERT006", HasCertification, &[("verified_date", "2021-11-05")]),
        ("FAC003", "CERT001", HasCertification, &[("verified_date", "2023-08-18")]),
        ("FAC003", "CERT002", HasCertification, &[("verified_date", "2022-06-25")]),
        ("FAC004", "CERT001", HasCertification, &[("verified_date", "2023-04-14")]),
        ("FAC004", "CERT005", HasCertification, &[("verified_date", "2020-10-08")]),
        // Regulatory requirement
        ("MAT005", "CERT004", RequiresCertification, &[("status", "Active"), ("renewal_date", "2024-12-31")]),
    ];
    for (from, to, kind, p) in edges {
        store
            .connect(*from, *to, *kind, props(p))
            .expect("seed edges reference seeded records");
    }

    info!(
        records = store.record_count(),
        edges = store.edge_count(),
        "seeded supply chain store"
    );
    store
}
