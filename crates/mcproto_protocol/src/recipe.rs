use std::io::Write;

use anyhow::bail;

use crate::slot::Slot;
use crate::{Decode, Encode};

/// An alternative set of items any one of which satisfies an ingredient
/// slot in a recipe.
pub type Ingredient = Vec<Slot>;

/// A crafting/smelting/smithing recipe, identified on the wire by a type
/// string followed by a recipe id string, with the remaining shape chosen
/// by the type.
#[derive(Clone, PartialEq, Debug)]
pub enum Recipe {
    CraftingShapeless {
        id: String,
        group: String,
        ingredients: Vec<Ingredient>,
        result: Slot,
    },
    CraftingShaped {
        id: String,
        width: i32,
        height: i32,
        group: String,
        ingredients: Vec<Ingredient>,
        result: Slot,
    },
    Smelting(CookingRecipe),
    Blasting(CookingRecipe),
    CampfireCooking(CookingRecipe),
    Stonecutting {
        id: String,
        group: String,
        ingredient: Ingredient,
        result: Slot,
    },
    Smithing {
        id: String,
        base: Ingredient,
        addition: Ingredient,
        result: Slot,
    },
}

#[derive(Clone, PartialEq, Debug)]
pub struct CookingRecipe {
    pub id: String,
    pub group: String,
    pub ingredient: Ingredient,
    pub result: Slot,
    pub experience: f32,
    pub cooking_time: i32,
}

impl Recipe {
    fn type_name(&self) -> &'static str {
        match self {
            Recipe::CraftingShapeless { .. } => "minecraft:crafting_shapeless",
            Recipe::CraftingShaped { .. } => "minecraft:crafting_shaped",
            Recipe::Smelting(_) => "minecraft:smelting",
            Recipe::Blasting(_) => "minecraft:blasting",
            Recipe::CampfireCooking(_) => "minecraft:campfire_cooking",
            Recipe::Stonecutting { .. } => "minecraft:stonecutting",
            Recipe::Smithing { .. } => "minecraft:smithing",
        }
    }
}

fn encode_cooking(r: &CookingRecipe, mut w: impl Write) -> anyhow::Result<()> {
    r.group.encode(&mut w)?;
    r.ingredient.encode(&mut w)?;
    r.result.encode(&mut w)?;
    r.experience.encode(&mut w)?;
    crate::var_int::VarInt(r.cooking_time).encode(w)
}

fn decode_cooking(id: String, r: &mut &[u8]) -> anyhow::Result<CookingRecipe> {
    Ok(CookingRecipe {
        id,
        group: String::decode(r)?,
        ingredient: Ingredient::decode(r)?,
        result: Slot::decode(r)?,
        experience: f32::decode(r)?,
        cooking_time: crate::var_int::VarInt::decode(r)?.0,
    })
}

impl Encode for Recipe {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.type_name().encode(&mut w)?;

        match self {
            Recipe::CraftingShapeless {
                id,
                group,
                ingredients,
                result,
            } => {
                id.encode(&mut w)?;
                group.encode(&mut w)?;
                ingredients.encode(&mut w)?;
                result.encode(w)
            }
            Recipe::CraftingShaped {
                id,
                width,
                height,
                group,
                ingredients,
                result,
            } => {
                id.encode(&mut w)?;
                crate::var_int::VarInt(*width).encode(&mut w)?;
                crate::var_int::VarInt(*height).encode(&mut w)?;
                group.encode(&mut w)?;
                ingredients.encode(&mut w)?;
                result.encode(w)
            }
            Recipe::Smelting(r) | Recipe::Blasting(r) | Recipe::CampfireCooking(r) => {
                r.id.encode(&mut w)?;
                encode_cooking(r, w)
            }
            Recipe::Stonecutting {
                id,
                group,
                ingredient,
                result,
            } => {
                id.encode(&mut w)?;
                group.encode(&mut w)?;
                ingredient.encode(&mut w)?;
                result.encode(w)
            }
            Recipe::Smithing {
                id,
                base,
                addition,
                result,
            } => {
                id.encode(&mut w)?;
                base.encode(&mut w)?;
                addition.encode(&mut w)?;
                result.encode(w)
            }
        }
    }
}

impl Decode<'_> for Recipe {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let kind = String::decode(r)?;
        let id = String::decode(r)?;

        Ok(match kind.as_str() {
            "minecraft:crafting_shapeless" => Recipe::CraftingShapeless {
                id,
                group: String::decode(r)?,
                ingredients: Vec::<Ingredient>::decode(r)?,
                result: Slot::decode(r)?,
            },
            "minecraft:crafting_shaped" => {
                let width = crate::var_int::VarInt::decode(r)?.0;
                let height = crate::var_int::VarInt::decode(r)?.0;
                Recipe::CraftingShaped {
                    id,
                    width,
                    height,
                    group: String::decode(r)?,
                    ingredients: Vec::<Ingredient>::decode(r)?,
                    result: Slot::decode(r)?,
                }
            }
            "minecraft:smelting" => Recipe::Smelting(decode_cooking(id, r)?),
            "minecraft:blasting" => Recipe::Blasting(decode_cooking(id, r)?),
            "minecraft:campfire_cooking" => Recipe::CampfireCooking(decode_cooking(id, r)?),
            "minecraft:stonecutting" => Recipe::Stonecutting {
                id,
                group: String::decode(r)?,
                ingredient: Ingredient::decode(r)?,
                result: Slot::decode(r)?,
            },
            "minecraft:smithing" => Recipe::Smithing {
                id,
                base: Ingredient::decode(r)?,
                addition: Ingredient::decode(r)?,
                result: Slot::decode(r)?,
            },
            other => bail!("unknown recipe type \"{other}\""),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapeless_recipe_round_trip() {
        let recipe = Recipe::CraftingShapeless {
            id: "minecraft:stick".to_owned(),
            group: "sticks".to_owned(),
            ingredients: vec![vec![Slot::present(5, 1, Default::default())]],
            result: Slot::present(280, 4, Default::default()),
        };
        let mut buf = vec![];
        recipe.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Recipe::decode(&mut r).unwrap(), recipe);
    }

    #[test]
    fn smelting_recipe_round_trip() {
        let recipe = Recipe::Smelting(CookingRecipe {
            id: "minecraft:iron_ingot".to_owned(),
            group: "".to_owned(),
            ingredient: vec![Slot::present(15, 1, Default::default())],
            result: Slot::present(265, 1, Default::default()),
            experience: 0.7,
            cooking_time: 200,
        });
        let mut buf = vec![];
        recipe.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Recipe::decode(&mut r).unwrap(), recipe);
    }

    #[test]
    fn unknown_recipe_type_errors() {
        let mut buf = vec![];
        "minecraft:bogus".to_owned().encode(&mut buf).unwrap();
        "id".to_owned().encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert!(Recipe::decode(&mut r).is_err());
    }
}
