//! Field keys of the intake payload.
//!
//! These are the names the scoring backend expects in the submitted JSON
//! object, so they stay in the protocol's French vocabulary.

// Patient profile
pub const PATIENT_ID: &str = "patient_id";
pub const AGE_YEARS: &str = "age_years";
pub const AGE_MONTHS: &str = "age_months";
pub const GENDER: &str = "gender";
pub const POIDS: &str = "poids";

// Child branch (under 5 years)
pub const INCAPABLE_BOIRE_TETER: &str = "incapable_boire_teter";
pub const VOMIT_TOUT: &str = "vomit_tout";
pub const PERIMETRE_BRACHIAL_MUAC: &str = "perimetre_brachial_muac";

// Pregnancy branch (women over 13 years)
pub const ENCEINTE: &str = "enceinte";
pub const TRIMESTRE: &str = "trimestre";
pub const DERNIERE_DATE_REGLES: &str = "derniere_date_regles";

// Location
pub const DISTRICT: &str = "district";
pub const REGION: &str = "region";
pub const COMMUNE: &str = "commune";
pub const GPS_LATITUDE: &str = "gps_latitude";
pub const GPS_LONGITUDE: &str = "gps_longitude";
pub const USAGE_MOUSTIQUAIRE: &str = "usage_moustiquaire";

// Vital signs
pub const TEMPERATURE_C: &str = "temperature_c";
pub const SPO2_PCT: &str = "spo2_pct";
pub const FC_BPM: &str = "fc_bpm";
pub const FR_PM: &str = "fr_pm";
pub const PA_SYSTOLIQUE: &str = "pa_systolique";
pub const PA_DIASTOLIQUE: &str = "pa_diastolique";

// Reported symptoms, one boolean each
pub const SYMPTOMES: &str = "symptomes";
pub const FIEVRE: &str = "fievre";
pub const CEPHALEES: &str = "cephalees";
pub const TROUBLES_CONSCIENCE: &str = "troubles_conscience";
pub const NAUSEES_VOMISSEMENTS: &str = "nausees_vomissements";
pub const FATIGUE: &str = "fatigue";
pub const DOULEURS_ARTICULAIRES: &str = "douleurs_articulaires";
pub const FRISSONS: &str = "frissons";
pub const DIARHEE: &str = "diarhee";
pub const CONVULSIONS: &str = "convulsions";

// Fever branch
pub const DUREE_FIEVRE_JOURS: &str = "duree_fievre_jours";
pub const FIEVRE_CYCLIQUE: &str = "fievre_cyclique";

// Rapid diagnostic test, when one was run on site
pub const TDR_PALUDISME: &str = "tdr_paludisme";

/// Session metadata keys added by the completion emitter.
pub mod meta {
    pub const ROBOT_ID: &str = "robot_id";
    pub const HEALTH_CENTER: &str = "health_center";
    pub const NURSE_NAME: &str = "nurse_name";
    pub const SOURCE_TYPE: &str = "source_type";
    pub const DATA_QUALITY_STATUS: &str = "data_quality_status";
    pub const CONSULTATION_ID: &str = "consultation_id";
    pub const TIMESTAMP: &str = "timestamp";

    /// Every metadata key, in payload order.
    pub const ALL: [&str; 7] = [
        ROBOT_ID,
        HEALTH_CENTER,
        NURSE_NAME,
        SOURCE_TYPE,
        DATA_QUALITY_STATUS,
        CONSULTATION_ID,
        TIMESTAMP,
    ];
}
