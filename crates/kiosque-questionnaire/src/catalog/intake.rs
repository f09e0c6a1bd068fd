use std::sync::LazyLock;

use kiosque_core::fields;
use kiosque_core::models::answer::AnswerStore;

use super::Catalog;
use crate::question::{ChoiceOption, QuestionDefinition, QuestionKind};

/// Malaria triage intake, PNLP protocol.
/// Profile, child and pregnancy branches, location, vital signs, symptoms,
/// fever branch, then the optional rapid test.
pub fn intake_catalog() -> &'static Catalog {
    static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
        use QuestionKind::*;

        Catalog::new(vec![
            // Patient profile
            QuestionDefinition::new(fields::PATIENT_ID, FreeText, "Identifiant du patient (carnet de santé)")
                .help("Laisser vide si le patient n'a pas de carnet")
                .placeholder("CI-000123")
                .pattern(r"^[A-Za-z0-9-]{3,20}$"),
            QuestionDefinition::new(fields::AGE_YEARS, Numeric, "Quel est l'âge du patient ?")
                .help("En années révolues")
                .required()
                .bounds(0.0, 120.0),
            QuestionDefinition::new(fields::AGE_MONTHS, Numeric, "Et combien de mois en plus ?")
                .required()
                .bounds(0.0, 11.0)
                .visible_if(is_under_five),
            QuestionDefinition::new(fields::GENDER, SingleChoice, "Sexe du patient")
                .required()
                .options(vec![
                    ChoiceOption::new("Masculin", "M"),
                    ChoiceOption::new("Féminin", "F"),
                ]),
            QuestionDefinition::new(fields::POIDS, Numeric, "Poids du patient")
                .help("En kilogrammes")
                .required()
                .bounds(1.0, 250.0),
            // Child branch
            QuestionDefinition::new(fields::INCAPABLE_BOIRE_TETER, SingleChoice, "L'enfant est-il incapable de boire ou de téter ?")
                .required()
                .options(yes_no())
                .visible_if(is_under_five),
            QuestionDefinition::new(fields::VOMIT_TOUT, SingleChoice, "L'enfant vomit-il tout ce qu'il consomme ?")
                .required()
                .options(yes_no())
                .visible_if(is_under_five),
            QuestionDefinition::new(fields::PERIMETRE_BRACHIAL_MUAC, Numeric, "Périmètre brachial (MUAC)")
                .help("En millimètres, si la bande est disponible")
                .bounds(60.0, 250.0)
                .visible_if(is_under_five),
            // Pregnancy branch
            QuestionDefinition::new(fields::ENCEINTE, SingleChoice, "La patiente est-elle enceinte ?")
                .required()
                .options(yes_no())
                .visible_if(can_be_pregnant),
            QuestionDefinition::new(fields::TRIMESTRE, SingleChoice, "À quel trimestre de grossesse ?")
                .required()
                .options(vec![
                    ChoiceOption::new("1er trimestre", 1),
                    ChoiceOption::new("2e trimestre", 2),
                    ChoiceOption::new("3e trimestre", 3),
                ])
                .visible_if(is_pregnant),
            QuestionDefinition::new(fields::DERNIERE_DATE_REGLES, Date, "Date des dernières règles")
                .placeholder("AAAA-MM-JJ")
                .visible_if(is_pregnant),
            // Location
            QuestionDefinition::new(fields::DISTRICT, DependentChoice, "District sanitaire de résidence")
                .required(),
            QuestionDefinition::new(fields::REGION, DependentChoice, "Région")
                .required()
                .depends_on(fields::DISTRICT),
            QuestionDefinition::new(fields::COMMUNE, DependentChoice, "Commune")
                .required()
                .depends_on(fields::REGION)
                .advance_on_choice(),
            QuestionDefinition::location(fields::GPS_LATITUDE, fields::GPS_LONGITUDE, "Position GPS du kiosque")
                .help("Facultatif : améliore la cartographie des cas"),
            QuestionDefinition::new(fields::USAGE_MOUSTIQUAIRE, SingleChoice, "Le patient dort-il sous moustiquaire imprégnée ?")
                .required()
                .options(yes_no()),
            // Vital signs
            QuestionDefinition::new(fields::TEMPERATURE_C, Numeric, "Température corporelle (°C)")
                .required()
                .bounds(35.0, 42.0)
                .suggestions(vec![
                    ChoiceOption::new("Normale 37,0", 37.0),
                    ChoiceOption::new("Fébrile 38,5", 38.5),
                    ChoiceOption::new("Forte 39,5", 39.5),
                ]),
            QuestionDefinition::new(fields::SPO2_PCT, Numeric, "Saturation en oxygène (SpO2 %)")
                .required()
                .bounds(50.0, 100.0),
            QuestionDefinition::new(fields::FC_BPM, Numeric, "Fréquence cardiaque (battements/min)")
                .required()
                .bounds(30.0, 250.0),
            QuestionDefinition::new(fields::FR_PM, Numeric, "Fréquence respiratoire (cycles/min)")
                .required()
                .bounds(5.0, 100.0),
            QuestionDefinition::new(fields::PA_SYSTOLIQUE, Numeric, "Pression artérielle systolique (mmHg)")
                .required()
                .bounds(50.0, 250.0),
            QuestionDefinition::new(fields::PA_DIASTOLIQUE, Numeric, "Pression artérielle diastolique (mmHg)")
                .required()
                .bounds(30.0, 150.0),
            // Symptoms
            QuestionDefinition::new(fields::SYMPTOMES, MultiCheckbox, "Quels symptômes le patient présente-t-il ?")
                .help("Cocher tout ce qui s'applique")
                .checkboxes(&[
                    ("Fièvre", fields::FIEVRE),
                    ("Céphalées", fields::CEPHALEES),
                    ("Troubles de la conscience", fields::TROUBLES_CONSCIENCE),
                    ("Nausées / vomissements", fields::NAUSEES_VOMISSEMENTS),
                    ("Fatigue / prostration", fields::FATIGUE),
                    ("Douleurs articulaires", fields::DOULEURS_ARTICULAIRES),
                    ("Frissons", fields::FRISSONS),
                    ("Diarrhée", fields::DIARHEE),
                    ("Convulsions", fields::CONVULSIONS),
                ]),
            // Fever branch
            QuestionDefinition::new(fields::DUREE_FIEVRE_JOURS, Numeric, "Depuis combien de jours dure la fièvre ?")
                .required()
                .bounds(0.0, 60.0)
                .suggestions(vec![
                    ChoiceOption::new("1 jour", 1),
                    ChoiceOption::new("2 jours", 2),
                    ChoiceOption::new("3 jours ou plus", 3),
                ])
                .visible_if(has_fever),
            QuestionDefinition::new(fields::FIEVRE_CYCLIQUE, SingleChoice, "La fièvre revient-elle par accès (cyclique) ?")
                .required()
                .options(yes_no())
                .visible_if(has_fever),
            // Rapid diagnostic test
            QuestionDefinition::new(fields::TDR_PALUDISME, SingleChoice, "Résultat du TDR paludisme")
                .help("Uniquement si un test rapide a été réalisé")
                .options(vec![
                    ChoiceOption::new("Positif", "positif"),
                    ChoiceOption::new("Négatif", "négatif"),
                    ChoiceOption::new("Inconcluant", "inconcluant"),
                ]),
        ])
    });
    &CATALOG
}

fn yes_no() -> Vec<ChoiceOption> {
    vec![ChoiceOption::new("Oui", true), ChoiceOption::new("Non", false)]
}

fn is_under_five(answers: &AnswerStore) -> bool {
    answers.number(fields::AGE_YEARS).is_some_and(|age| age < 5.0)
}

fn can_be_pregnant(answers: &AnswerStore) -> bool {
    answers.text(fields::GENDER) == Some("F")
        && answers.number(fields::AGE_YEARS).is_some_and(|age| age > 13.0)
}

fn is_pregnant(answers: &AnswerStore) -> bool {
    can_be_pregnant(answers) && answers.flag(fields::ENCEINTE)
}

fn has_fever(answers: &AnswerStore) -> bool {
    answers.flag(fields::FIEVRE)
        || answers
            .number(fields::TEMPERATURE_C)
            .is_some_and(|temp| temp >= 37.5)
}
