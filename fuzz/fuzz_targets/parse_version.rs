#![no_main]

use libfuzzer_sys::fuzz_target;
use polyver::{Mode, Version};

fuzz_target!(|data: &str| {
    for mode in [Mode::Maven, Mode::Semver, Mode::Mixed] {
        let version = Version::with_mode(data, mode);
        let _canonical = version.canonical();
    }
});
