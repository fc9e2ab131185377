use super::*;

fn canon(raw: &str, predictor: Predictor) -> String {
    canonicalize(raw, predictor).unwrap().to_string()
}

#[test]
fn test_class_i_spellings_agree() {
    assert_eq!(canon("HLA-A*02:01", Predictor::Syfpeithi), "HLA-A*02:01");
    assert_eq!(canon("HLA-A*02:01", Predictor::Mhcflurry), "HLA-A*02:01");
    assert_eq!(canon("HLA-A02:01", Predictor::NetMhcPan), "HLA-A*02:01");
    assert_eq!(canon("HLA-A02:01", Predictor::Mhcnuggets), "HLA-A*02:01");
    assert_eq!(canon("A0201", Predictor::NetMhcPan), "HLA-A*02:01");
    assert_eq!(canon("hla-b*07:02", Predictor::Mhcflurry), "HLA-B*07:02");
}

#[test]
fn test_class_ii_spellings() {
    assert_eq!(canon("DRB1_0101", Predictor::NetMhcIIPan), "HLA-DRB1*01:01");
    assert_eq!(canon("HLA-DRB1*01:01", Predictor::Syfpeithi), "HLA-DRB1*01:01");
    assert_eq!(
        canon("HLA-DQA10501-DQB10201", Predictor::NetMhcIIPan),
        "HLA-DQA1*05:01-DQB1*02:01"
    );
    assert_eq!(
        canon("HLA-DPA1*01:03/DPB1*04:01", Predictor::Mhcflurry),
        "HLA-DPA1*01:03-DPB1*04:01"
    );
}

#[test]
fn test_canonical_names_are_path_safe() {
    let name = canon("HLA-DPA1*01:03/DPB1*04:01", Predictor::Mhcflurry);
    assert!(!name.contains('/'));
    assert!(!name.contains(char::is_whitespace));
}

#[test]
fn test_field_splitting() {
    assert_eq!(canon("HLA-B15101", Predictor::NetMhcPan), "HLA-B*15:101");
    assert_eq!(canon("HLA-A*02:01:01:01", Predictor::Mhcflurry), "HLA-A*02:01:01:01");
    assert_eq!(canon("HLA-A020101", Predictor::NetMhcPan), "HLA-A*02:01:01");
    assert_eq!(canon("HLA-A*02", Predictor::Mhcflurry), "HLA-A*02");
}

#[test]
fn test_expression_suffix_and_legacy_cw() {
    assert_eq!(canon("HLA-A*24:09N", Predictor::Mhcflurry), "HLA-A*24:09N");
    assert_eq!(canon("HLA-Cw*0701", Predictor::Syfpeithi), "HLA-C*07:01");
}

#[test]
fn test_mouse_alleles() {
    assert_eq!(canon("H-2-Kb", Predictor::NetMhcPan), "H2-Kb");
    assert_eq!(canon("H2-Kb", Predictor::Mhcflurry), "H2-Kb");
    assert_eq!(canon("H-2-IAb", Predictor::NetMhcIIPan), "H2-IAb");

    let allele = MhcAllele::parse("H2-Db").unwrap();
    assert_eq!(allele.species(), Species::Mouse);
    assert_eq!(allele.chains()[0].gene(), "D");
    assert!(allele.chains()[0].fields().is_empty());
}

#[test]
fn test_parse_structure() {
    let allele = MhcAllele::parse("HLA-DQA1*05:01-DQB1*02:01").unwrap();
    assert_eq!(allele.species(), Species::Human);
    assert_eq!(allele.chains().len(), 2);
    assert_eq!(allele.chains()[0].gene(), "DQA1");
    assert_eq!(allele.chains()[1].fields(), ["02".to_string(), "01".to_string()]);
}

#[test]
fn test_idempotent_on_canonical_output() {
    let raws = [
        ("HLA-A02:01", Predictor::NetMhcPan),
        ("DRB1_1501", Predictor::NetMhcIIPan),
        ("HLA-DQA10501-DQB10201", Predictor::NetMhcIIPan),
        ("H-2-Kb", Predictor::NetMhcPan),
        ("HLA-A*24:09N", Predictor::Mhcflurry),
    ];
    for (raw, predictor) in raws {
        let once = canonicalize(raw, predictor).unwrap();
        for other in Predictor::ALL {
            let twice = canonicalize(once.as_str(), other).unwrap();
            assert_eq!(once, twice, "{} via {}", raw, other);
        }
    }
}

#[test]
fn test_unparsable_alleles() {
    let err = canonicalize("HLA-Z*01:01", Predictor::Mhcflurry).unwrap_err();
    assert_eq!(err.raw, "HLA-Z*01:01");
    assert_eq!(err.predictor, Predictor::Mhcflurry);
    assert!(matches!(err.source, AlleleParseError::UnknownGene(_)));
    assert!(err.to_string().contains("HLA-Z*01:01"));
    assert!(err.to_string().contains("mhcflurry"));

    assert!(matches!(
        MhcAllele::parse("   ").unwrap_err(),
        AlleleParseError::Empty
    ));
    assert!(matches!(
        MhcAllele::parse("HLA-A").unwrap_err(),
        AlleleParseError::MissingFields(_)
    ));
    assert!(matches!(
        MhcAllele::parse("HLA-A*2:1").unwrap_err(),
        AlleleParseError::InvalidFields(_)
    ));
    assert!(matches!(
        MhcAllele::parse("HLA-A*02:01-B*07:02").unwrap_err(),
        AlleleParseError::InvalidPair(_)
    ));
    assert!(matches!(
        MhcAllele::parse("HLA-DQA1*05:01-DQB1*02:01-DRB1*01:01").unwrap_err(),
        AlleleParseError::TooManyChains(_)
    ));
}

#[test]
fn test_distinct_alleles_stay_distinct() {
    let a = canonicalize("HLA-A*02:01", Predictor::Mhcflurry).unwrap();
    let b = canonicalize("HLA-A*02:06", Predictor::Mhcflurry).unwrap();
    let c = canonicalize("HLA-A02:01", Predictor::NetMhcPan).unwrap();
    assert_ne!(a, b);
    assert_eq!(a, c);
}
