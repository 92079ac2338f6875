use pbotp_core::{KeyAgreement, Mode, Responder};

#[test]
#[ignore]
fn fuzz_smoke_random_keys_and_challenges() {
    // Smoke fuzz: random keypairs answering random peer challenges.
    for round in 0..16usize {
        let private_key = rand::random::<[u8; 32]>();
        let peer_secret = rand::random::<[u8; 32]>();
        let challenge = KeyAgreement::new(&peer_secret)
            .expect("peer key")
            .public_key();
        let payload: Vec<u8> = (0..rand::random::<u8>() as usize)
            .map(|_| rand::random())
            .collect();

        let length = round % 19 + 1;
        let numeric =
            Responder::new(&private_key, Mode::Numeric, length).expect("numeric responder");
        let code = numeric.respond(&payload, &challenge).expect("numeric respond");
        assert_eq!(code.chars().filter(char::is_ascii_digit).count(), length);

        let words = round % 23 + 1;
        let phrase = Responder::new(&private_key, Mode::Phrase, words).expect("phrase responder");
        let text = phrase.respond(&payload, &challenge).expect("phrase respond");
        assert_eq!(text.split(' ').count(), words);
    }
}
