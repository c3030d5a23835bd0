fn main() {
    // ESP-IDF link arguments are only needed for firmware builds; host
    // builds (tests, fuzzing) skip them.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
