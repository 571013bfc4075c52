fn main() {
    // Emits ESP-IDF link/search directives when building for the device;
    // harmless no-op in host builds (the env vars are simply absent).
    embuild::espidf::sysenv::output();
}
