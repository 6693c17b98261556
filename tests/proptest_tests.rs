// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests check the resolver and cipher invariants against arbitrary inputs.

mod common;

use cfgref::adapters::{decrypt_hex_with_key, encrypt_str_with_key};
use cfgref::domain::{ENCRYPTED_ENV_MARKER, ENV_MARKER};
use cfgref::prelude::*;
use common::SimpleConfig;
use proptest::prelude::*;
use std::collections::HashMap;

fn not_a_marker(s: &str) -> bool {
    !s.starts_with(ENV_MARKER) && !s.starts_with(ENCRYPTED_ENV_MARKER)
}

// Strings without a marker come back byte-for-byte
proptest! {
    #[test]
    fn test_plain_strings_untouched(s in "\\PC*") {
        prop_assume!(not_a_marker(&s));
        let env = MapEnv::new();
        let resolver = Resolver::new(&env, "");
        prop_assert_eq!(resolver.resolve_str(&s).unwrap(), s);
    }
}

// Strings that merely look similar to a marker are not indirections
proptest! {
    #[test]
    fn test_near_markers_untouched(key in "[A-Z_]{1,12}", prefix in "(#env:|#Env:|ENV:|# ENV:|#ENV |#EncryptedEnv:)") {
        let s = format!("{}{}", prefix, key);
        let env = MapEnv::new().with_var(key.clone(), "value");
        let resolver = Resolver::new(&env, "");
        prop_assert_eq!(resolver.resolve_str(&s).unwrap(), s);
    }
}

// #ENV:k resolves to the value of k, whatever it is
proptest! {
    #[test]
    fn test_env_lookup(key in "[A-Za-z_][A-Za-z0-9_]{0,20}", value in "\\PC+") {
        let env = MapEnv::new().with_var(key.clone(), value.clone());
        let resolver = Resolver::new(&env, "");
        prop_assert_eq!(resolver.resolve_str(&format!("#ENV:{}", key)).unwrap(), value);
    }
}

// Unset variables fail with an error naming them
proptest! {
    #[test]
    fn test_missing_env_names_key(key in "[A-Za-z_][A-Za-z0-9_]{0,20}") {
        let env = MapEnv::new();
        let resolver = Resolver::new(&env, "");
        let err = resolver.resolve_str(&format!("#ENV:{}", key)).unwrap_err();
        let is_missing_key = matches!(err, ConfigError::EnvVarNotFound { key: ref k } if *k == key);
        prop_assert!(is_missing_key);
    }
}

// decrypt(encrypt(p)) == p and two encryptions differ
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn test_cipher_round_trip(plaintext in "\\PC+") {
        let cipher = Aes256GcmCipher::from_hex_key(&generate_key_hex()).unwrap();
        let first = cipher.encrypt_str_to_hex(&plaintext).unwrap();
        let second = cipher.encrypt_str_to_hex(&plaintext).unwrap();

        prop_assert_ne!(&first, &second);
        prop_assert_eq!(cipher.decrypt_hex_to_string(&first).unwrap(), plaintext.clone());
        prop_assert_eq!(cipher.decrypt_hex_to_string(&second).unwrap(), plaintext);
    }
}

// Any single bit flip is rejected
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn test_cipher_rejects_bit_flips(
        plaintext in prop::collection::vec(any::<u8>(), 1..64),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8
    ) {
        let cipher = Aes256GcmCipher::from_hex_key(&generate_key_hex()).unwrap();
        let mut sealed = cipher.encrypt(&plaintext).unwrap();
        let i = position.index(sealed.len());
        sealed[i] ^= 1 << bit;
        prop_assert!(matches!(cipher.decrypt(&sealed), Err(CipherError::DecryptionFailed)));
    }
}

// A different key never opens the ciphertext
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn test_cipher_rejects_other_keys(plaintext in "\\PC+") {
        let key = generate_key_hex();
        let other = generate_key_hex();
        prop_assume!(key != other);

        let sealed = encrypt_str_with_key(&key, &plaintext).unwrap();
        prop_assert!(cipher_fails(&other, &sealed));
    }
}

fn cipher_fails(key: &str, sealed: &str) -> bool {
    matches!(
        decrypt_hex_with_key(key, sealed),
        Err(CipherError::DecryptionFailed)
    )
}

// Resolving an already resolved tree changes nothing
proptest! {
    #[test]
    fn test_resolution_idempotent(
        foo in "\\PC*",
        inner in "\\PC*",
        value in "\\PC+"
    ) {
        prop_assume!(not_a_marker(&foo) && not_a_marker(&inner));
        let env = MapEnv::new().with_var("K", value.clone());
        let mut config = SimpleConfig {
            foo: foo.clone(),
            ..Default::default()
        };
        config.bar.inner_foo = "#ENV:K".to_string();
        config.bar.inner_bar = inner.clone();

        resolve_with_env(&env, "", &mut config).unwrap();
        let once = format!("{:?}", config);
        resolve_with_env(&env, "", &mut config).unwrap();

        prop_assert_eq!(format!("{:?}", config), once);
        prop_assert_eq!(config.foo, foo);
        prop_assert_eq!(config.bar.inner_foo, value);
        prop_assert_eq!(config.bar.inner_bar, inner);
    }
}

// Map entries resolve independently of iteration order
proptest! {
    #[test]
    fn test_map_entries_independent(
        entries in prop::collection::hash_map("[a-z]{1,8}", prop::bool::ANY, 0..16)
    ) {
        let env = MapEnv::new().with_var("V", "resolved");
        let resolver = Resolver::new(&env, "");
        let mut map: HashMap<String, String> = entries
            .iter()
            .map(|(k, indirect)| {
                let v = if *indirect { "#ENV:V".to_string() } else { format!("plain-{}", k) };
                (k.clone(), v)
            })
            .collect();

        map.resolve_with(&resolver).unwrap();

        for (k, indirect) in &entries {
            let expected = if *indirect { "resolved".to_string() } else { format!("plain-{}", k) };
            prop_assert_eq!(&map[k], &expected);
        }
    }
}
