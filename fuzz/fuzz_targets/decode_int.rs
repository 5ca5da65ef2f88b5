#![no_main]

use libfuzzer_sys::fuzz_target;
use bertlv::{Enumerated, Integer, Mode, Universal};

fuzz_target!(|data: &[u8]| {
    for mode in [Mode::Ber, Mode::Der] {
        if let Ok(int) = mode.decode_as::<Integer>(data) {
            let encoded = int.to_vec();
            assert_eq!(Mode::Der.decode_as::<Integer>(&encoded).unwrap(), int);
            if let Ok(value) = i128::try_from(&int) {
                assert_eq!(Integer::from(value), int);
                assert_eq!(int.to_string(), value.to_string());
            }
        }
        let _ = mode.decode_as::<Enumerated>(data);
    }
});
