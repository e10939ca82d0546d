//! Per-kind projection schemas.
//!
//! These mirror the filters applied when the local index is loaded, so a
//! record fetched from the remote catalog ends up with the same shape as an
//! index hit.

use once_cell::sync::Lazy;

use crate::entity::EntityKind;

use super::projection::ProjectionSchema;

const TIMESTAMPS: &[&str] = &["updated_date", "created_date"];

fn id_only() -> ProjectionSchema {
    ProjectionSchema::new().keep("id")
}

/// An institution reference nested inside another record.
fn institution_ref() -> ProjectionSchema {
    ProjectionSchema::new()
        .keep("id")
        .drop_all(&["ror", "country_code", "type"])
}

static WORKS: Lazy<ProjectionSchema> = Lazy::new(|| {
    ProjectionSchema::new()
        .keep("id")
        .drop("display_name")
        .nested(
            "ids",
            ProjectionSchema::new().drop_all(&["openalex", "mag", "doi"]),
        )
        .nested(
            "host_venue",
            ProjectionSchema::new()
                .keep("id")
                .drop_all(&["issn", "is_oa", "version", "license"]),
        )
        .nested_list(
            "authorships",
            ProjectionSchema::new()
                .nested("author", ProjectionSchema::new().keep("id").drop("orcid"))
                .drop("raw_affiliation_string")
                .nested_list("institutions", institution_ref()),
        )
        .drop_all(&["biblio", "is_retracted", "is_paratext"])
        .nested_list("concepts", id_only())
        .drop_all(&["mesh", "alternate_host_venues"])
        .inverted_text("abstract_inverted_index", "abstract")
        .keep("referenced_works")
        .keep("related_works")
        .drop("ngrams_url")
        .drop_all(TIMESTAMPS)
});

static AUTHORS: Lazy<ProjectionSchema> = Lazy::new(|| {
    ProjectionSchema::new()
        .keep("id")
        .drop_all(&["orcid", "display_name_alternatives"])
        .nested("ids", ProjectionSchema::new().drop_all(&["openalex", "mag"]))
        .nested("last_known_institution", institution_ref())
        .nested_list("x_concepts", id_only())
        .drop_all(TIMESTAMPS)
});

static INSTITUTIONS: Lazy<ProjectionSchema> = Lazy::new(|| {
    ProjectionSchema::new()
        .keep("id")
        .drop("country_code")
        .nested(
            "ids",
            ProjectionSchema::new().drop_all(&["openalex", "ror", "mag"]),
        )
        .nested(
            "geo",
            ProjectionSchema::new().drop_all(&[
                "geonames_city_id",
                "country_code",
                "latitude",
                "longitude",
            ]),
        )
        .drop("international")
        .nested_list("associated_institutions", institution_ref())
        .nested_list("x_concepts", id_only())
        .drop_all(TIMESTAMPS)
});

static VENUES: Lazy<ProjectionSchema> = Lazy::new(|| {
    ProjectionSchema::new()
        .keep("id")
        .drop_all(&["issn", "is_in_doaj", "ids"])
        .nested_list("x_concepts", id_only())
        .drop_all(TIMESTAMPS)
});

static CONCEPTS: Lazy<ProjectionSchema> = Lazy::new(|| {
    ProjectionSchema::new()
        .keep("id")
        .nested("ids", ProjectionSchema::new().drop_all(&["openalex", "mag"]))
        .drop("international")
        .nested_list("ancestors", id_only())
        .nested_list("related_concepts", id_only())
        .drop_all(TIMESTAMPS)
});

/// The projection schema for an entity kind.
pub fn schema_for(kind: EntityKind) -> &'static ProjectionSchema {
    match kind {
        EntityKind::Work => &*WORKS,
        EntityKind::Author => &*AUTHORS,
        EntityKind::Institution => &*INSTITUTIONS,
        EntityKind::Venue => &*VENUES,
        EntityKind::Concept => &*CONCEPTS,
    }
}
