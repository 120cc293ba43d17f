/*!

This is the long-form manual for `ballot_state` and `ballotcheck`.

## Categories

The standard ballot has five categories, in this order:

| key                | id | name              | preferential votes |
|--------------------|----|-------------------|--------------------|
| `presidente`       | 1  | Presidente        | 0                  |
| `senador-nacional` | 4  | Senador Nacional  | 1                  |
| `senador-regional` | 5  | Senador Regional  | 1                  |
| `diputado`         | 3  | Diputado          | 2                  |
| `parlamento`       | 6  | Parlamento Andino | 2                  |

A different set can be declared with the [builder](../builder/struct.Builder.html) or,
for `ballotcheck`, with a layout file passed through `--config`.

## Classification rules

Each category is in one of three states: `blanco`, `valido` or `nulo`. Every ballot starts
with all its categories `blanco`.

The president only accepts a party: marking one makes the category `valido`, removing it
makes it `blanco` again.

The other categories accept a party and up to a fixed number of preferential candidates of
that same party. The rules are applied in order, the first one that applies decides:

1. no party and no candidate: `blanco`
2. a party and no candidate: `valido`
3. a party and some candidates:
   - more candidates than allowed: `nulo` (`demasiados-preferenciales`)
   - a candidate from another party: `nulo` (`candidatos-diferentes-partidos`)
   - otherwise `valido`, and the candidate numbers are kept in the order they were marked
4. candidates without a party: `nulo` (`candidatos-sin-partido`)

In the first two `nulo` cases, the party and candidates recorded by the last accepted
selection are kept. In the last case they are cleared.

A `nulo` category is not final: any later selection is classified again with the same rules.

## Input formats

### Layout (`--config`)

```json
{
  "categories": [
    { "key": "presidente", "categoryId": 1, "displayName": "Presidente", "maxPreferentials": 0 },
    { "key": "diputado", "categoryId": 3, "displayName": "Diputado", "maxPreferentials": 2 }
  ]
}
```

### Selections (`--input`)

The selections are replayed in order, as if the voter made them one after the other.

```json
{
  "selections": [
    { "category": "presidente", "party": "P1" },
    { "category": "diputado", "party": "P1",
      "candidates": [ { "numero": 5, "id_partido": "P1" }, { "numero": 9, "id_partido": "P1" } ] }
  ]
}
```

## Output

The categories that are not blank are written in JSON (`--out`), with the field names
expected by the submission backend:

```json
[
  { "id_categoria": 3, "nombre": "Diputado", "estado": "valido",
    "id_partido": "P1", "candidatos_preferenciales": [5, 9] }
]
```

When `--reference` is given, the output is compared with the content of that file and any
difference is reported.

*/
