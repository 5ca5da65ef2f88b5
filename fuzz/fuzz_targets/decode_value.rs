#![no_main]

use libfuzzer_sys::fuzz_target;
use bertlv::{Mode, SequenceOf, Value};
use bertlv::encode::Values;

fuzz_target!(|data: &[u8]| {
    for mode in [Mode::Ber, Mode::Der] {
        if let Ok(value) = mode.decode_any(data) {
            let encoded = value.to_vec();
            assert_eq!(encoded.len(), value.encoded_len());
            assert_eq!(Mode::Der.decode_any(&encoded).unwrap(), value);
            if let Value::Sequence(seq) = value {
                let _ = seq.values(mode);
            }
        }
        let _ = mode.decode_as::<SequenceOf>(data);
    }
});
