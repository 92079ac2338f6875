//! Fixed vectors from the pbotp v2 protocol documentation. These pin the
//! whole pipeline: key agreement, domain-tagged keyed hashing, and both
//! text encodings.

use base64::{Engine as _, prelude::BASE64_URL_SAFE_NO_PAD};
use hex_literal::hex;
use pbotp_core::{DOMAIN_TAG, Mode, Responder, ResponderError};

const PRIVATE_KEY_B64: &str = "zGRMAXRoSKwMZG5EM-_B-s8oxTfICcfBiN1PAHCCqVo";
const CHALLENGE: [u8; 32] =
    hex!("d121728ed9fef9dcf42bcadf0a60deb07134f1896fb7991f1684dddd6ba8b623");
const PAYLOAD: &[u8] = b"dev\0SSSN7PBXFG6DY\0root\0";

fn private_key() -> Vec<u8> {
    BASE64_URL_SAFE_NO_PAD
        .decode(PRIVATE_KEY_B64)
        .expect("documented key decodes")
}

#[test]
fn domain_tag_is_pinned() {
    // Interoperating responders absorb exactly these bytes first.
    assert_eq!(DOMAIN_TAG, b"de.n621.pbotp.v2\0");
}

#[test]
fn numeric_vector() {
    let responder = Responder::new(&private_key(), Mode::Numeric, 9).unwrap();
    let code = responder.respond(PAYLOAD, &CHALLENGE).unwrap();
    assert_eq!(code, "526 044 548");
}

#[test]
fn phrase_vector() {
    let responder = Responder::new(&private_key(), Mode::Phrase, 4).unwrap();
    let phrase = responder.respond(PAYLOAD, &CHALLENGE).unwrap();
    assert_eq!(phrase, "correct horse avocado cupboard");
}

#[test]
fn vectors_are_reproducible_across_instances() {
    let first = Responder::new(&private_key(), Mode::Numeric, 9)
        .unwrap()
        .respond(PAYLOAD, &CHALLENGE)
        .unwrap();
    let second = Responder::new(&private_key(), Mode::Numeric, 9)
        .unwrap()
        .respond(PAYLOAD, &CHALLENGE)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn public_key_is_stable() {
    let a = Responder::new(&private_key(), Mode::Numeric, 9).unwrap();
    let b = Responder::new(&private_key(), Mode::Phrase, 23).unwrap();
    assert_eq!(a.public_key(), b.public_key());
    assert_ne!(a.public_key(), [0u8; 32]);
}

#[test]
fn construction_boundaries() {
    let key = private_key();
    assert!(Responder::new(&key, Mode::Numeric, 19).is_ok());
    assert!(Responder::new(&key, Mode::Phrase, 23).is_ok());
    for (mode, length) in [
        (Mode::Numeric, 0),
        (Mode::Phrase, 0),
        (Mode::Numeric, 20),
        (Mode::Phrase, 24),
    ] {
        let err = Responder::new(&key, mode, length).unwrap_err();
        assert!(matches!(err, ResponderError::InvalidLength { .. }));
    }
}

#[test]
fn bad_challenge_then_good_challenge() {
    let responder = Responder::new(&private_key(), Mode::Numeric, 9).unwrap();
    let err = responder.respond(PAYLOAD, &CHALLENGE[..31]).unwrap_err();
    assert!(matches!(err, ResponderError::InvalidChallenge { .. }));
    let code = responder.respond(PAYLOAD, &CHALLENGE).unwrap();
    assert_eq!(code, "526 044 548");
}
