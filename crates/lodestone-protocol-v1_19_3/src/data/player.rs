use lodestone_protocol_core::magic_values;

magic_values! {
    pub enum Hand: "hand" {
        MainHand = 0,
        OffHand = 1,
    }
}
