//! Tests for PDF object types and color space declarations.

use pdfrsrc_core::{ColorSpaceDef, PDFDict, PDFObjRef, PDFObject, PDFStream, PdfError};

// === PDFObject type tests ===

#[test]
fn test_object_null() {
    assert!(PDFObject::Null.is_null());
    assert!(!PDFObject::Bool(true).is_null());
}

#[test]
fn test_object_num_coercion() {
    assert_eq!(PDFObject::Int(42).as_num().unwrap(), 42.0);
    assert_eq!(PDFObject::Real(0.5).as_num().unwrap(), 0.5);
    assert!(PDFObject::Null.as_num().is_err());
    assert!(PDFObject::Real(0.5).as_int().is_err());
}

#[test]
fn test_object_name() {
    let obj = PDFObject::name("Type");
    assert_eq!(obj.as_name().unwrap(), "Type");
    assert!(PDFObject::Null.as_name().is_err());
}

#[test]
fn test_object_dict() {
    let dict = PDFObject::Dict(PDFDict::from([
        ("Type".to_string(), PDFObject::name("Page")),
        ("Count".to_string(), PDFObject::Int(5)),
    ]));
    let inner = dict.as_dict().unwrap();
    assert_eq!(inner.get("Type").unwrap().as_name().unwrap(), "Page");
    assert_eq!(inner.get("Count").unwrap().as_int().unwrap(), 5);
    assert!(PDFObject::Null.as_dict().is_err());
}

#[test]
fn test_object_array() {
    let obj = PDFObject::Array(vec![PDFObject::Int(1), PDFObject::name("X")]);
    let items = obj.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].as_name().unwrap(), "X");
    assert!(PDFObject::Dict(PDFDict::new()).as_array().is_err());
}

#[test]
fn test_type_error_names_both_types() {
    let err = PDFObject::Int(1).as_stream().unwrap_err();
    match err {
        PdfError::TypeError { expected, got } => {
            assert_eq!(expected, "stream");
            assert_eq!(got, "int");
        }
        other => panic!("expected TypeError, got {other:?}"),
    }
}

// === PDFObjRef tests ===

#[test]
fn test_objref_in_object() {
    let obj = PDFObject::reference(42);
    let r = obj.as_ref().unwrap();
    assert_eq!(*r, PDFObjRef::new(42, 0));
    assert_eq!(r.to_string(), "42 0 R");
}

#[test]
fn test_objref_identity_includes_generation() {
    assert_ne!(PDFObjRef::new(7, 0), PDFObjRef::new(7, 1));
}

// === PDFStream tests ===

#[test]
fn test_stream_inline_resources() {
    let resources = PDFObject::Dict(PDFDict::from([(
        "Font".to_string(),
        PDFObject::Dict(PDFDict::new()),
    )]));
    let attrs = PDFDict::from([
        ("Subtype".to_string(), PDFObject::name("Form")),
        ("Resources".to_string(), resources.clone()),
    ]);

    let stream = PDFStream::new(attrs, b"q Q".to_vec());
    assert_eq!(stream.get_rawdata(), b"q Q");
    assert_eq!(stream.get("Subtype"), Some(&PDFObject::name("Form")));
    assert_eq!(stream.resources(), Some(&resources));
    assert_eq!(stream.objid, None);
}

// === ColorSpaceDef tests ===

#[test]
fn test_colorspace_from_name() {
    let def = ColorSpaceDef::from_object(&PDFObject::name("DeviceCMYK")).unwrap();
    assert_eq!(def.family_name(), "DeviceCMYK");
    assert_eq!(def.predefined().unwrap().ncomponents, 4);
}

#[test]
fn test_colorspace_family_keeps_full_array() {
    let arr = vec![
        PDFObject::name("Separation"),
        PDFObject::name("Spot"),
        PDFObject::name("DeviceCMYK"),
        PDFObject::reference(9),
    ];
    let def = ColorSpaceDef::from_object(&PDFObject::Array(arr.clone())).unwrap();
    assert_eq!(
        def,
        ColorSpaceDef::Family {
            family: "Separation".to_string(),
            params: arr,
        }
    );
    assert_eq!(def.predefined().unwrap().name, "Separation");
}

#[test]
fn test_colorspace_rejects_bad_shapes() {
    for obj in [
        PDFObject::Array(vec![]),
        PDFObject::Array(vec![PDFObject::reference(1)]),
        PDFObject::Int(3),
        PDFObject::Dict(PDFDict::new()),
    ] {
        assert!(matches!(
            ColorSpaceDef::from_object(&obj),
            Err(PdfError::FormatError(_))
        ));
    }
}
