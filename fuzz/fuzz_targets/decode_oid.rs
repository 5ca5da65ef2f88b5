#![no_main]

use libfuzzer_sys::fuzz_target;
use bertlv::{Mode, Oid, Universal};

fuzz_target!(|data: &[u8]| {
    let Ok(oid) = Mode::Ber.decode_as::<Oid>(data) else {
        return
    };
    assert_eq!(Mode::Der.decode_as::<Oid>(oid.to_vec()).unwrap(), oid);

    let parsed: Oid = oid.to_string().parse().unwrap();
    assert_eq!(parsed, oid);
    assert_eq!(Oid::from_content(&oid.to_content()).unwrap(), oid);
});
