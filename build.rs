use shadow_rs::ShadowBuilder;

fn main() {
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
